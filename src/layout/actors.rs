use super::Steps;
use super::text::measure_label;
use crate::config::{LayoutConfig, MAX_DIMENSION};
use crate::geo::Point;
use crate::ir::Graph;

/// Fills in every actor dimension that is missing or degenerate from its label,
/// keeping the ones the caller set. Sizes are capped at [`MAX_DIMENSION`].
pub(super) fn normalize_actor_sizes(graph: &mut Graph, config: &LayoutConfig) {
    let actors = graph.actors().to_vec();
    for id in actors {
        let object = graph.object(id);
        let (mut width, mut height) = (object.rect.width, object.rect.height);
        if !object.rect.has_usable_size() {
            let label = measure_label(&object.label, config);
            if !is_usable(width) {
                width = (label.width + config.node_padding_x * 2.0).max(config.min_actor_width);
            }
            if !is_usable(height) {
                height = (label.height + config.node_padding_y * 2.0).max(config.min_actor_height);
            }
            tracing::trace!(actor = %object.abs_id, width, height, "derived actor size from label");
        }
        graph.set_size(id, width.min(MAX_DIMENSION), height.min(MAX_DIMENSION));
    }
}

fn is_usable(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Assigns each actor's X so centers strictly increase in declaration order.
pub(super) fn place_actors_horizontally(graph: &mut Graph, config: &LayoutConfig, steps: &Steps) {
    let actors = graph.actors().to_vec();
    let mut previous: Option<(f32, f32)> = None;
    for id in actors {
        let rect = &mut graph.object_mut(id).rect;
        let half = rect.width / 2.0;
        let center_x = match previous {
            None => config.horizontal_pad + half,
            Some((prev_center, prev_half)) => {
                prev_center + steps.actor_step.max(prev_half + half + config.horizontal_pad)
            }
        };
        rect.top_left.x = center_x - half;
        previous = Some((center_x, half));
    }
}

/// Hangs every header box from the shared baseline so all bottoms line up.
pub(super) fn align_actor_headers(graph: &mut Graph, steps: &Steps) {
    let actors = graph.actors().to_vec();
    for id in actors {
        let rect = &mut graph.object_mut(id).rect;
        rect.top_left = Point::new(rect.top_left.x, steps.baseline - rect.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ObjectId;

    fn steps(baseline: f32) -> Steps {
        Steps {
            actor_step: 200.0,
            edge_step: 100.0,
            baseline,
        }
    }

    fn sized_actors(sizes: &[(f32, f32)]) -> (Graph, Vec<ObjectId>) {
        let mut graph = Graph::new();
        let ids = sizes
            .iter()
            .enumerate()
            .map(|(idx, (w, h))| {
                let id = graph.ensure_child(None, &format!("n{idx}"));
                graph.set_size(id, *w, *h);
                id
            })
            .collect();
        (graph, ids)
    }

    #[test]
    fn narrow_actors_use_min_distance() {
        let config = LayoutConfig::default();
        let (mut graph, ids) = sized_actors(&[(100.0, 100.0), (30.0, 30.0), (60.0, 10.0)]);
        place_actors_horizontally(&mut graph, &config, &steps(100.0));
        let centers: Vec<f32> = ids.iter().map(|id| graph.object(*id).center().x).collect();
        assert_eq!(centers, vec![100.0, 300.0, 500.0]);
        assert_eq!(graph.object(ids[0]).top_left().x, config.horizontal_pad);
    }

    #[test]
    fn wide_actors_push_neighbours_apart() {
        let config = LayoutConfig::default();
        let (mut graph, ids) = sized_actors(&[(400.0, 50.0), (300.0, 50.0)]);
        place_actors_horizontally(&mut graph, &config, &steps(50.0));
        let left = graph.object(ids[0]);
        let right = graph.object(ids[1]);
        let gap = right.top_left().x - left.rect.right();
        assert_eq!(gap, config.horizontal_pad);
        assert!(right.center().x - left.center().x >= config.min_actor_distance);
    }

    #[test]
    fn headers_share_bottom() {
        let (mut graph, ids) = sized_actors(&[(100.0, 100.0), (30.0, 30.0)]);
        align_actor_headers(&mut graph, &steps(100.0));
        assert_eq!(graph.object(ids[0]).top_left().y, 0.0);
        assert_eq!(graph.object(ids[1]).top_left().y, 70.0);
        assert_eq!(graph.object(ids[0]).bottom(), graph.object(ids[1]).bottom());
    }

    #[test]
    fn unsized_actor_gets_label_size() {
        let config = LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        };
        let mut graph = Graph::new();
        let id = graph.ensure_child(None, "svc");
        graph.set_label(id, "A rather long service name");
        let tiny = graph.ensure_child(None, "x");
        graph.set_size(tiny, 0.0, f32::NAN);
        normalize_actor_sizes(&mut graph, &config);

        let object = graph.object(id);
        assert!(object.width() > config.min_actor_width);
        assert!(object.height() >= config.min_actor_height);
        let tiny = graph.object(tiny);
        assert_eq!(tiny.width(), config.min_actor_width);
        assert!(tiny.rect.has_usable_size());
    }

    #[test]
    fn partial_size_keeps_the_given_dimension() {
        let config = LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        };
        let (mut graph, ids) = sized_actors(&[(500.0, 0.0), (0.0, 90.0)]);
        normalize_actor_sizes(&mut graph, &config);
        assert_eq!(graph.object(ids[0]).width(), 500.0);
        assert!(graph.object(ids[0]).height() >= config.min_actor_height);
        assert_eq!(graph.object(ids[1]).height(), 90.0);
        assert_eq!(graph.object(ids[1]).width(), config.min_actor_width);
    }

    #[test]
    fn huge_actors_keep_finite_centers() {
        let config = LayoutConfig::default();
        let (mut graph, ids) = sized_actors(&[(f32::MAX, f32::MAX), (f32::MAX, 10.0)]);
        normalize_actor_sizes(&mut graph, &config);
        place_actors_horizontally(&mut graph, &config, &steps(MAX_DIMENSION));
        for id in &ids {
            let object = graph.object(*id);
            assert_eq!(object.width(), MAX_DIMENSION);
            assert!(object.center().x.is_finite());
        }
        let gap = graph.object(ids[1]).top_left().x - graph.object(ids[0]).rect.right();
        assert_eq!(gap, config.horizontal_pad);
    }

    #[test]
    fn fixed_sizes_are_kept() {
        let config = LayoutConfig::default();
        let (mut graph, ids) = sized_actors(&[(30.0, 30.0)]);
        normalize_actor_sizes(&mut graph, &config);
        assert_eq!(graph.object(ids[0]).width(), 30.0);
    }
}
