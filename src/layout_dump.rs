use crate::geo::Rect;
use crate::ir::{EdgeKind, Graph, ObjectId, ObjectRole};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub actors: Vec<ObjectDump>,
    pub spans: Vec<SpanDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct ObjectDump {
    pub id: String,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct SpanDump {
    pub id: String,
    pub actor: String,
    pub depth: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub points: Vec<[f32; 2]>,
}

impl LayoutDump {
    /// The canvas starts at the origin so the margin left of the first actor is
    /// part of it. Geometry drawn further left moves `x` below zero.
    pub fn from_graph(graph: &Graph, horizontal_pad: f32) -> Self {
        // The right margin mirrors the left one reserved before the first actor.
        let bounds = graph
            .bounds()
            .map(|rect| Rect::new(rect.top_left, rect.width + horizontal_pad, rect.height))
            .unwrap_or_default();

        let mut actors = Vec::new();
        let mut spans = Vec::new();
        for (idx, object) in graph.objects.iter().enumerate() {
            match graph.role(ObjectId(idx)) {
                ObjectRole::Actor => actors.push(ObjectDump {
                    id: object.abs_id.clone(),
                    label: object.label.clone(),
                    x: object.rect.top_left.x,
                    y: object.rect.top_left.y,
                    width: object.rect.width,
                    height: object.rect.height,
                }),
                ObjectRole::ActivationSpan { actor, depth } => spans.push(SpanDump {
                    id: object.abs_id.clone(),
                    actor: graph.object(actor).abs_id.clone(),
                    depth,
                    x: object.rect.top_left.x,
                    y: object.rect.top_left.y,
                    width: object.rect.width,
                    height: object.rect.height,
                }),
            }
        }

        let edges = graph
            .edges
            .iter()
            .map(|edge| EdgeDump {
                from: graph.object(edge.src).abs_id.clone(),
                to: graph.object(edge.dst).abs_id.clone(),
                kind: edge.kind,
                label: edge.label.clone(),
                points: edge.route.iter().map(|p| [p.x, p.y]).collect(),
            })
            .collect();

        let left = bounds.top_left.x.min(0.0);
        LayoutDump {
            x: left,
            y: bounds.top_left.y,
            width: bounds.right() - left,
            height: bounds.height,
            actors,
            spans,
            edges,
        }
    }
}

pub fn write_layout_dump(path: &Path, graph: &Graph, horizontal_pad: f32) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    write_layout_dump_to(writer, graph, horizontal_pad)
}

pub fn write_layout_dump_to<W: Write>(
    mut writer: W,
    graph: &Graph,
    horizontal_pad: f32,
) -> anyhow::Result<()> {
    let dump = LayoutDump::from_graph(graph, horizontal_pad);
    serde_json::to_writer_pretty(&mut writer, &dump)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
