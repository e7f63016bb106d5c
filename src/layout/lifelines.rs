use super::Steps;
use super::messages::message_y;
use crate::geo::Point;
use crate::ir::{Edge, EdgeKind, Graph};

/// Appends one vertical edge per actor, from the header bottom to one step past
/// the last message.
pub(super) fn add_lifeline_edges(graph: &mut Graph, steps: &Steps) {
    let end_y = match graph.edges.len() {
        0 => message_y(steps, 0),
        count => message_y(steps, count - 1) + steps.edge_step,
    };
    let actors = graph.actors().to_vec();
    for actor in actors {
        let object = graph.object(actor);
        let (x, start_y) = (object.center().x, object.bottom());
        graph.edges.push(Edge {
            src: actor,
            dst: actor,
            label: None,
            kind: EdgeKind::Lifeline,
            route: vec![Point::new(x, start_y), Point::new(x, end_y)],
        });
    }
}
