//! JSON5 description of a sequence diagram, the input format of the CLI.
//!
//! ```json5
//! {
//!   actors: [
//!     { id: "a", label: "Alice", width: 100, height: 100, spans: [{ id: "t1" }] },
//!     { id: "b" },
//!   ],
//!   messages: [
//!     { from: "a.t1", to: "b", label: "hello" },
//!     { from: "b", to: "a.t1" },
//!   ],
//! }
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::ir::{Graph, ObjectId};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document: {0}")]
    Syntax(#[from] json5::Error),
    #[error("empty object path {0:?}")]
    EmptyPath(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceDocument {
    #[serde(default)]
    pub actors: Vec<ActorDecl>,
    #[serde(default)]
    pub messages: Vec<MessageDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActorDecl {
    pub id: String,
    pub label: Option<String>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    #[serde(default)]
    pub spans: Vec<SpanDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpanDecl {
    pub id: String,
    #[serde(default)]
    pub spans: Vec<SpanDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageDecl {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
}

impl SequenceDocument {
    pub fn parse(input: &str) -> Result<Self, DocumentError> {
        Ok(json5::from_str(input)?)
    }

    /// Builds the graph. Paths referenced only by messages are created on the fly,
    /// after the declared actors, in the order they are first mentioned.
    pub fn to_graph(&self) -> Result<Graph, DocumentError> {
        let mut graph = Graph::new();
        for actor in &self.actors {
            let id = ensure(&mut graph, &actor.id)?;
            if let Some(label) = &actor.label {
                graph.set_label(id, label.clone());
            }
            // A missing dimension stays 0 and is derived from the label during layout.
            graph.set_size(id, actor.width.unwrap_or(0.0), actor.height.unwrap_or(0.0));
            declare_spans(&mut graph, id, &actor.spans)?;
        }
        for message in &self.messages {
            let src = ensure(&mut graph, &message.from)?;
            let dst = ensure(&mut graph, &message.to)?;
            match &message.label {
                Some(label) => graph.add_labeled_message(src, dst, label.clone()),
                None => graph.add_message(src, dst),
            };
        }
        Ok(graph)
    }
}

fn ensure(graph: &mut Graph, path: &str) -> Result<ObjectId, DocumentError> {
    let segments = path.split('.').map(str::trim).collect::<Vec<_>>();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(DocumentError::EmptyPath(path.to_string()));
    }
    graph
        .ensure_path(&segments)
        .ok_or_else(|| DocumentError::EmptyPath(path.to_string()))
}

fn declare_spans(graph: &mut Graph, parent: ObjectId, spans: &[SpanDecl]) -> Result<(), DocumentError> {
    for span in spans {
        if span.id.trim().is_empty() || span.id.contains('.') {
            return Err(DocumentError::EmptyPath(span.id.clone()));
        }
        let id = graph.ensure_child(Some(parent), span.id.trim());
        declare_spans(graph, id, &span.spans)?;
    }
    Ok(())
}
