use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const HORIZONTAL_PAD: f32 = 50.0;
pub const MIN_ACTOR_DISTANCE: f32 = 200.0;
/// Minimum vertical distance between consecutive messages.
pub const MIN_EDGE_DISTANCE: f32 = 100.0;
pub const ACTIVATION_BOX_WIDTH: f32 = 20.0;
/// Nested activation boxes grow by this much per level.
pub const ACTIVATION_BOX_DEPTH_GROW_FACTOR: f32 = 10.0;
/// Height of an activation box attached to a single message.
pub const DEFAULT_ACTIVATION_BOX_HEIGHT: f32 = MIN_EDGE_DISTANCE / 2.0;
/// Upper bound for any tunable or actor dimension, so sums of sizes stay finite.
pub const MAX_DIMENSION: f32 = 1.0e6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub horizontal_pad: f32,
    pub min_actor_distance: f32,
    pub min_edge_distance: f32,
    pub activation_box_width: f32,
    pub activation_box_depth_grow_factor: f32,
    /// Half of `min_edge_distance` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_activation_box_height: Option<f32>,
    pub self_message_width: f32,
    pub min_actor_width: f32,
    pub min_actor_height: f32,
    pub node_padding_x: f32,
    pub node_padding_y: f32,
    pub label_font_family: String,
    pub label_font_size: f32,
    pub label_line_height: f32,
    pub fast_text_metrics: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_pad: HORIZONTAL_PAD,
            min_actor_distance: MIN_ACTOR_DISTANCE,
            min_edge_distance: MIN_EDGE_DISTANCE,
            activation_box_width: ACTIVATION_BOX_WIDTH,
            activation_box_depth_grow_factor: ACTIVATION_BOX_DEPTH_GROW_FACTOR,
            default_activation_box_height: None,
            self_message_width: HORIZONTAL_PAD,
            min_actor_width: 80.0,
            min_actor_height: 48.0,
            node_padding_x: 30.0,
            node_padding_y: 15.0,
            label_font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            label_font_size: 16.0,
            label_line_height: 1.5,
            fast_text_metrics: false,
        }
    }
}

impl LayoutConfig {
    /// Height of an activation box tied to a single message.
    pub fn activation_box_height(&self) -> f32 {
        self.default_activation_box_height
            .unwrap_or(self.min_edge_distance / 2.0)
    }

    /// Replaces non-finite, non-positive or oversized tunables with their defaults
    /// so the geometry never sees NaN or a collapsed spacing.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let pick = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 && value <= MAX_DIMENSION {
                value
            } else {
                fallback
            }
        };
        let pick_non_negative = |value: f32, fallback: f32| {
            if value.is_finite() && value >= 0.0 && value <= MAX_DIMENSION {
                value
            } else {
                fallback
            }
        };
        Self {
            horizontal_pad: pick_non_negative(self.horizontal_pad, defaults.horizontal_pad),
            min_actor_distance: pick(self.min_actor_distance, defaults.min_actor_distance),
            min_edge_distance: pick(self.min_edge_distance, defaults.min_edge_distance),
            activation_box_width: pick(self.activation_box_width, defaults.activation_box_width),
            activation_box_depth_grow_factor: pick_non_negative(
                self.activation_box_depth_grow_factor,
                defaults.activation_box_depth_grow_factor,
            ),
            default_activation_box_height: self
                .default_activation_box_height
                .filter(|height| height.is_finite() && *height > 0.0 && *height <= MAX_DIMENSION),
            self_message_width: pick(self.self_message_width, defaults.self_message_width),
            min_actor_width: pick(self.min_actor_width, defaults.min_actor_width),
            min_actor_height: pick(self.min_actor_height, defaults.min_actor_height),
            node_padding_x: pick_non_negative(self.node_padding_x, defaults.node_padding_x),
            node_padding_y: pick_non_negative(self.node_padding_y, defaults.node_padding_y),
            label_font_family: self.label_font_family.clone(),
            label_font_size: pick(self.label_font_size, defaults.label_font_size),
            label_line_height: pick(self.label_line_height, defaults.label_line_height),
            fast_text_metrics: self.fast_text_metrics,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let parsed: LayoutConfig = serde_json::from_str(&contents)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(parsed)
}
