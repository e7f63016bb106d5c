//! Sequence diagram layout.
//!
//! [`layout`] runs the phases in a fixed order over a borrowed [`Graph`]:
//! actor sizing and horizontal placement, header alignment, message routing,
//! lifeline synthesis, and activation box sizing. Every call recomputes the whole
//! diagram, so lifelines left over from a previous call are dropped first.

mod activations;
mod actors;
mod error;
mod lifelines;
mod messages;
pub(crate) mod text;

pub use error::LayoutError;
pub use text::TextBlock;

use crate::config::LayoutConfig;
use crate::context::LayoutContext;
use crate::ir::{EdgeKind, Graph};

use activations::place_activation_boxes;
use actors::{align_actor_headers, normalize_actor_sizes, place_actors_horizontally};
use lifelines::add_lifeline_edges;
use messages::route_messages;
use text::measure_label;

/// Spacing derived once per call from the tunables and the graph's labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Steps {
    /// Minimum center-to-center distance between adjacent actors.
    pub actor_step: f32,
    /// Vertical distance between consecutive messages.
    pub edge_step: f32,
    /// Shared bottom Y of every actor header.
    pub baseline: f32,
}

/// Lays out `graph` in place using the default tunables.
pub fn layout(ctx: &LayoutContext, graph: &mut Graph) -> Result<(), LayoutError> {
    layout_with_config(ctx, graph, &LayoutConfig::default())
}

pub fn layout_with_config(
    ctx: &LayoutContext,
    graph: &mut Graph,
    config: &LayoutConfig,
) -> Result<(), LayoutError> {
    let _entered = ctx.span().enter();
    let config = config.sanitized();

    graph.edges.retain(|edge| edge.kind == EdgeKind::Message);
    validate_edges(graph)?;

    if graph.actors().is_empty() {
        tracing::debug!("graph has no actors; nothing to lay out");
        return Ok(());
    }
    tracing::debug!(
        actors = graph.actors().len(),
        messages = graph.edges.len(),
        "laying out sequence diagram"
    );

    checkpoint(ctx)?;
    normalize_actor_sizes(graph, &config);
    let steps = compute_steps(graph, &config);
    tracing::trace!(?steps, "derived spacing");

    checkpoint(ctx)?;
    place_actors_horizontally(graph, &config, &steps);
    align_actor_headers(graph, &steps);

    checkpoint(ctx)?;
    route_messages(ctx, graph, &config, &steps)?;

    checkpoint(ctx)?;
    add_lifeline_edges(graph, &steps);

    checkpoint(ctx)?;
    place_activation_boxes(ctx, graph, &config, &steps)?;

    Ok(())
}

pub(crate) fn checkpoint(ctx: &LayoutContext) -> Result<(), LayoutError> {
    if ctx.is_cancelled() {
        tracing::debug!("layout cancelled");
        return Err(LayoutError::Cancelled);
    }
    Ok(())
}

fn validate_edges(graph: &Graph) -> Result<(), LayoutError> {
    for (idx, edge) in graph.edges.iter().enumerate() {
        for endpoint in [edge.src, edge.dst] {
            if !graph.contains(endpoint) {
                return Err(LayoutError::UnknownObject {
                    edge: idx,
                    object: endpoint.index(),
                });
            }
        }
    }
    Ok(())
}

fn compute_steps(graph: &Graph, config: &LayoutConfig) -> Steps {
    let mut actor_step = config.min_actor_distance;
    let mut edge_step = config.min_edge_distance;
    for label in graph.messages().filter_map(|edge| edge.label.as_deref()) {
        if label.trim().is_empty() {
            continue;
        }
        let block = measure_label(label, config);
        actor_step = actor_step.max(block.width + config.horizontal_pad);
        edge_step = edge_step.max(block.height + config.horizontal_pad);
    }
    let baseline = graph
        .actors()
        .iter()
        .map(|id| graph.object(*id).height())
        .fold(0.0, f32::max);
    Steps {
        actor_step,
        edge_step,
        baseline,
    }
}
