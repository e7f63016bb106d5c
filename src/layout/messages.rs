use super::{LayoutError, Steps, checkpoint};
use crate::config::LayoutConfig;
use crate::context::LayoutContext;
use crate::geo::Point;
use crate::ir::{Graph, ObjectId};

/// Y of the message at `rank` in declaration order.
pub(super) fn message_y(steps: &Steps, rank: usize) -> f32 {
    steps.baseline + (rank as f32 + 1.0) * steps.edge_step
}

/// Center X an endpoint inherits from its actor.
fn endpoint_x(graph: &Graph, id: ObjectId) -> f32 {
    graph.object(graph.owning_actor(id)).center().x
}

/// Routes every message as a horizontal segment between its endpoints' lifelines.
/// Messages that start and end on the same actor get a small loop instead.
pub(super) fn route_messages(
    ctx: &LayoutContext,
    graph: &mut Graph,
    config: &LayoutConfig,
    steps: &Steps,
) -> Result<(), LayoutError> {
    for rank in 0..graph.edges.len() {
        checkpoint(ctx)?;
        let edge = &graph.edges[rank];
        let src_x = endpoint_x(graph, edge.src);
        let dst_x = endpoint_x(graph, edge.dst);
        let same_actor = graph.owning_actor(edge.src) == graph.owning_actor(edge.dst);
        let y = message_y(steps, rank);

        let route = if same_actor {
            tracing::trace!(rank, "routing self message");
            let right = src_x + config.self_message_width;
            let bottom = y + steps.edge_step / 2.0;
            vec![
                Point::new(src_x, y),
                Point::new(right, y),
                Point::new(right, bottom),
                Point::new(dst_x, bottom),
            ]
        } else {
            vec![Point::new(src_x, y), Point::new(dst_x, y)]
        };
        graph.edges[rank].route = route;
    }
    Ok(())
}
