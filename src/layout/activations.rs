use std::collections::HashMap;

use super::messages::message_y;
use super::{LayoutError, Steps, checkpoint};
use crate::config::LayoutConfig;
use crate::context::LayoutContext;
use crate::geo::{Point, Rect};
use crate::ir::{Graph, ObjectId};

/// Sizes every activation span from the messages attached to it and to its
/// nested spans. Boxes are centered on the owning actor and widen with depth.
pub(super) fn place_activation_boxes(
    ctx: &LayoutContext,
    graph: &mut Graph,
    config: &LayoutConfig,
    steps: &Steps,
) -> Result<(), LayoutError> {
    let own_extents = message_extents(graph);
    let pad = config.activation_box_height() / 2.0;
    let fallback_y = message_y(steps, 0);

    let actors = graph.actors().to_vec();
    for actor in actors {
        checkpoint(ctx)?;
        let center_x = graph.object(actor).center().x;
        let spans = spans_by_depth(graph, actor);
        if spans.is_empty() {
            continue;
        }
        tracing::trace!(actor = %graph.object(actor).abs_id, spans = spans.len(), "sizing activation boxes");

        // Vertical extent of each span including its nested spans.
        let mut extents: HashMap<ObjectId, (f32, f32)> = HashMap::new();
        for &(id, depth) in spans.iter().rev() {
            let mut extent = own_extents
                .get(&id)
                .map(|(min_y, max_y)| (min_y - pad, max_y + pad));
            for child in &graph.object(id).children {
                if let Some(&(top, bottom)) = extents.get(child) {
                    extent = Some(match extent {
                        Some((t, b)) => (t.min(top), b.max(bottom)),
                        None => (top, bottom),
                    });
                }
            }
            let (top, bottom) = match extent {
                Some(extent) => {
                    extents.insert(id, extent);
                    extent
                }
                None => {
                    tracing::debug!(object = %graph.object(id).abs_id, "activation span has no messages");
                    (fallback_y - pad, fallback_y + pad)
                }
            };

            let width = config.activation_box_width
                + depth as f32 * config.activation_box_depth_grow_factor;
            graph.object_mut(id).rect =
                Rect::new(Point::new(center_x - width / 2.0, top), width, bottom - top);
        }
    }
    Ok(())
}

/// Min/max Y of the message endpoints attached directly to each object.
fn message_extents(graph: &Graph) -> HashMap<ObjectId, (f32, f32)> {
    let mut extents: HashMap<ObjectId, (f32, f32)> = HashMap::new();
    let mut extend = |id: ObjectId, y: f32| {
        extents
            .entry(id)
            .and_modify(|(min_y, max_y)| {
                *min_y = min_y.min(y);
                *max_y = max_y.max(y);
            })
            .or_insert((y, y));
    };
    for edge in graph.messages() {
        if let (Some(first), Some(last)) = (edge.route.first(), edge.route.last()) {
            extend(edge.src, first.y);
            extend(edge.dst, last.y);
        }
    }
    extents
}

/// Spans below `actor` in pre-order, paired with their depth (direct children are 1).
fn spans_by_depth(graph: &Graph, actor: ObjectId) -> Vec<(ObjectId, usize)> {
    let mut order = Vec::new();
    let mut worklist: Vec<(ObjectId, usize)> = graph
        .object(actor)
        .children
        .iter()
        .rev()
        .map(|child| (*child, 1))
        .collect();
    while let Some((id, depth)) = worklist.pop() {
        order.push((id, depth));
        worklist.extend(
            graph
                .object(id)
                .children
                .iter()
                .rev()
                .map(|child| (*child, depth + 1)),
        );
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Edge;

    fn steps() -> Steps {
        Steps {
            actor_step: 200.0,
            edge_step: 100.0,
            baseline: 100.0,
        }
    }

    fn routed(graph: &mut Graph, src: ObjectId, dst: ObjectId, y: f32) {
        let mut edge = Edge::message(src, dst);
        edge.route = vec![Point::new(0.0, y), Point::new(0.0, y)];
        graph.edges.push(edge);
    }

    fn actor_at(graph: &mut Graph, id: &str, x: f32) -> ObjectId {
        let actor = graph.ensure_child(None, id);
        graph.object_mut(actor).rect = Rect::new(Point::new(x, 0.0), 100.0, 100.0);
        actor
    }

    #[test]
    fn pre_order_with_depths() {
        let mut graph = Graph::new();
        let a = graph.ensure_child(None, "a");
        let t1 = graph.ensure_child(Some(a), "t1");
        let inner = graph.ensure_child(Some(t1), "inner");
        let t2 = graph.ensure_child(Some(a), "t2");
        assert_eq!(
            spans_by_depth(&graph, a),
            vec![(t1, 1), (inner, 2), (t2, 1)]
        );
    }

    #[test]
    fn single_message_span_has_default_height() {
        let mut graph = Graph::new();
        let a = actor_at(&mut graph, "a", 0.0);
        let b = actor_at(&mut graph, "b", 300.0);
        let t1 = graph.ensure_child(Some(a), "t1");
        routed(&mut graph, t1, b, 200.0);
        let config = LayoutConfig::default();
        place_activation_boxes(&LayoutContext::new(), &mut graph, &config, &steps()).unwrap();

        let rect = graph.object(t1).rect;
        assert_eq!(rect.height, config.activation_box_height());
        assert_eq!(rect.width, config.activation_box_width + config.activation_box_depth_grow_factor);
        assert_eq!(rect.center(), Point::new(50.0, 200.0));
    }

    #[test]
    fn default_height_scales_with_edge_distance() {
        let mut graph = Graph::new();
        let a = actor_at(&mut graph, "a", 0.0);
        let b = actor_at(&mut graph, "b", 300.0);
        let t1 = graph.ensure_child(Some(a), "t1");
        routed(&mut graph, t1, b, 400.0);
        let config = LayoutConfig {
            min_edge_distance: 300.0,
            ..LayoutConfig::default()
        };
        place_activation_boxes(&LayoutContext::new(), &mut graph, &config, &steps()).unwrap();
        assert_eq!(graph.object(t1).rect.height, 150.0);
        assert_eq!(graph.object(t1).rect.center().y, 400.0);
    }

    #[test]
    fn span_covers_its_messages_and_nested_spans() {
        let mut graph = Graph::new();
        let a = actor_at(&mut graph, "a", 0.0);
        let b = actor_at(&mut graph, "b", 300.0);
        let t1 = graph.ensure_child(Some(a), "t1");
        let inner = graph.ensure_child(Some(t1), "inner");
        routed(&mut graph, t1, b, 200.0);
        routed(&mut graph, b, inner, 300.0);
        routed(&mut graph, inner, b, 400.0);
        place_activation_boxes(
            &LayoutContext::new(),
            &mut graph,
            &LayoutConfig::default(),
            &steps(),
        )
        .unwrap();

        let outer = graph.object(t1).rect;
        let nested = graph.object(inner).rect;
        assert_eq!(outer.top_left.y, 175.0);
        assert_eq!(outer.bottom(), 425.0);
        assert_eq!(nested.top_left.y, 275.0);
        assert_eq!(nested.bottom(), 425.0);
        assert!(nested.width > outer.width);
        assert_eq!(nested.center().x, 50.0);
        assert_eq!(outer.center().x, 50.0);
    }

    #[test]
    fn span_without_messages_sits_at_first_slot() {
        let mut graph = Graph::new();
        let a = actor_at(&mut graph, "a", 0.0);
        let idle = graph.ensure_child(Some(a), "idle");
        place_activation_boxes(
            &LayoutContext::new(),
            &mut graph,
            &LayoutConfig::default(),
            &steps(),
        )
        .unwrap();
        let rect = graph.object(idle).rect;
        assert_eq!(rect.center().y, 200.0);
        assert_eq!(rect.height, 50.0);
    }
}
