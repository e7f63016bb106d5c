use serde::Serialize;

use crate::geo::{Point, Rect};

/// Index of an object inside its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ObjectId(pub usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Object {
    /// Local name, unique among siblings.
    pub id: String,
    /// Dotted path from the root, e.g. `alice.t1`.
    pub abs_id: String,
    pub label: String,
    pub parent: Option<ObjectId>,
    pub children: Vec<ObjectId>,
    pub rect: Rect,
}

impl Object {
    pub fn top_left(&self) -> Point {
        self.rect.top_left
    }

    pub fn width(&self) -> f32 {
        self.rect.width
    }

    pub fn height(&self) -> f32 {
        self.rect.height
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    pub fn bottom(&self) -> f32 {
        self.rect.bottom()
    }
}

/// How an object takes part in the diagram. Derived from its position in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRole {
    Actor,
    ActivationSpan { actor: ObjectId, depth: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Message,
    Lifeline,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub src: ObjectId,
    pub dst: ObjectId,
    pub label: Option<String>,
    pub kind: EdgeKind,
    pub route: Vec<Point>,
}

impl Edge {
    pub fn message(src: ObjectId, dst: ObjectId) -> Self {
        Self {
            src,
            dst,
            label: None,
            kind: EdgeKind::Message,
            route: Vec::new(),
        }
    }

    pub fn is_message(&self) -> bool {
        self.kind == EdgeKind::Message
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Every object in creation order.
    pub objects: Vec<Object>,
    /// Children of the implicit root, in declaration order.
    pub root_children: Vec<ObjectId>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.0]
    }

    pub fn object_mut(&mut self, id: ObjectId) -> &mut Object {
        &mut self.objects[id.0]
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        id.0 < self.objects.len()
    }

    /// Top-level participants in declaration order.
    pub fn actors(&self) -> &[ObjectId] {
        &self.root_children
    }

    /// Returns the child `id` of `parent` (the root when `None`), creating it if needed.
    pub fn ensure_child(&mut self, parent: Option<ObjectId>, id: &str) -> ObjectId {
        let siblings = match parent {
            Some(parent) => &self.objects[parent.0].children,
            None => &self.root_children,
        };
        if let Some(existing) = siblings
            .iter()
            .copied()
            .find(|candidate| self.objects[candidate.0].id == id)
        {
            return existing;
        }

        let abs_id = match parent {
            Some(parent) => format!("{}.{}", self.objects[parent.0].abs_id, id),
            None => id.to_string(),
        };
        let new_id = ObjectId(self.objects.len());
        self.objects.push(Object {
            id: id.to_string(),
            abs_id,
            label: id.to_string(),
            parent,
            children: Vec::new(),
            rect: Rect::default(),
        });
        match parent {
            Some(parent) => self.objects[parent.0].children.push(new_id),
            None => self.root_children.push(new_id),
        }
        new_id
    }

    /// Walks `path` from the root, creating missing objects along the way.
    pub fn ensure_path<S: AsRef<str>>(&mut self, path: &[S]) -> Option<ObjectId> {
        let mut current = None;
        for segment in path {
            current = Some(self.ensure_child(current, segment.as_ref()));
        }
        current
    }

    pub fn find_path(&self, abs_id: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .position(|object| object.abs_id == abs_id)
            .map(ObjectId)
    }

    pub fn set_size(&mut self, id: ObjectId, width: f32, height: f32) {
        let rect = &mut self.objects[id.0].rect;
        rect.width = width;
        rect.height = height;
    }

    pub fn set_label(&mut self, id: ObjectId, label: impl Into<String>) {
        self.objects[id.0].label = label.into();
    }

    pub fn add_message(&mut self, src: ObjectId, dst: ObjectId) -> usize {
        self.edges.push(Edge::message(src, dst));
        self.edges.len() - 1
    }

    pub fn add_labeled_message(
        &mut self,
        src: ObjectId,
        dst: ObjectId,
        label: impl Into<String>,
    ) -> usize {
        let mut edge = Edge::message(src, dst);
        edge.label = Some(label.into());
        self.edges.push(edge);
        self.edges.len() - 1
    }

    pub fn messages(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|edge| edge.kind == EdgeKind::Message)
    }

    pub fn lifelines(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|edge| edge.kind == EdgeKind::Lifeline)
    }

    /// Top-level ancestor of `id` (the object itself for actors).
    pub fn owning_actor(&self, id: ObjectId) -> ObjectId {
        let mut current = id;
        while let Some(parent) = self.objects[current.0].parent {
            current = parent;
        }
        current
    }

    /// Nesting distance from the owning actor; actors are depth 0.
    pub fn depth(&self, id: ObjectId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.objects[current.0].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    pub fn role(&self, id: ObjectId) -> ObjectRole {
        match self.depth(id) {
            0 => ObjectRole::Actor,
            depth => ObjectRole::ActivationSpan {
                actor: self.owning_actor(id),
                depth,
            },
        }
    }

    /// Bounding box of every object and edge route, or `None` for an empty graph.
    pub fn bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        for object in &self.objects {
            bounds = Some(match bounds {
                Some(acc) => acc.union(&object.rect),
                None => object.rect,
            });
        }
        for point in self.edges.iter().flat_map(|edge| edge.route.iter()) {
            bounds = Some(match bounds {
                Some(acc) => acc.include_point(*point),
                None => Rect::new(*point, 0.0, 0.0),
            });
        }
        bounds
    }
}
