use serde::{Deserialize, Serialize};
use skia_safe::BlendMode;

use crate::errors::ShimmerError;

pub const DEFAULT_MASK_COLOR: u32 = 0xFFDD_DDDD;
pub const DEFAULT_INTENSITY: f32 = 0.0;
pub const DEFAULT_DROP_OFF: f32 = 0.3;
pub const DEFAULT_ANIMATION_DURATION: u64 = 1200;
pub const DEFAULT_START_DELAYED: u64 = 0;

/// Compositing mode used when stamping the gradient mask onto the content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MaskMode {
    #[default]
    SrcIn,
    SrcAtop,
    Multiply,
    Screen,
}

impl MaskMode {
    /// Maps the small integer codes of the original widget attribute surface.
    /// Unknown codes fall back to `SrcIn`.
    pub fn from_code(code: i32) -> Self {
        match code {
            3 => MaskMode::SrcIn,
            7 => MaskMode::SrcAtop,
            9 => MaskMode::Multiply,
            15 => MaskMode::Screen,
            _ => MaskMode::SrcIn,
        }
    }

    /// Parses a config name. Unknown names fall back to `SrcIn`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "src_in" => MaskMode::SrcIn,
            "src_atop" => MaskMode::SrcAtop,
            "multiply" => MaskMode::Multiply,
            "screen" => MaskMode::Screen,
            _ => MaskMode::SrcIn,
        }
    }

    pub fn to_blend_mode(self) -> BlendMode {
        match self {
            MaskMode::SrcIn => BlendMode::SrcIn,
            MaskMode::SrcAtop => BlendMode::SrcATop,
            MaskMode::Multiply => BlendMode::Multiply,
            MaskMode::Screen => BlendMode::Screen,
        }
    }
}

/// Specification of the shimmering effect.
///
/// Immutable once constructed; replace it wholesale via
/// [`crate::ShimmerEngine::set_mask_specs`], which restarts a running sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskSpecs {
    /// ARGB color tinting the sweep.
    pub mask_color: u32,
    /// Width of the fully opaque band of the sweep, `0.0..=1.0`.
    pub intensity: f32,
    /// How far from the edges the gradient starts fading, `0.0..=0.5`.
    pub drop_off: f32,
    pub mask_mode: MaskMode,
    /// One sweep traversal in milliseconds. Must be greater than zero.
    pub animation_duration: u64,
    /// Extra lead-in time in milliseconds, folded into the sweep's starting
    /// offset and total cycle duration.
    pub start_delayed: u64,
}

impl Default for MaskSpecs {
    fn default() -> Self {
        Self {
            mask_color: DEFAULT_MASK_COLOR,
            intensity: DEFAULT_INTENSITY,
            drop_off: DEFAULT_DROP_OFF,
            mask_mode: MaskMode::default(),
            animation_duration: DEFAULT_ANIMATION_DURATION,
            start_delayed: DEFAULT_START_DELAYED,
        }
    }
}

impl MaskSpecs {
    /// A zero duration would divide by zero when computing the lead-in
    /// width, so it is rejected outright.
    pub fn validate(&self) -> Result<(), ShimmerError> {
        if self.animation_duration == 0 {
            return Err(ShimmerError::InvalidConfiguration(
                "animation_duration must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Gradient stop positions for the sweep band.
    ///
    /// Non-decreasing for `drop_off` in `[0, 0.5]` and `intensity` in
    /// `[0, 1]`; no reordering is performed beyond the min/max guards on the
    /// outer stops, so combinations outside those ranges are the caller's
    /// responsibility.
    pub fn gradient_positions(&self) -> [f32; 4] {
        [
            self.drop_off.max(0.0),
            0.5 - self.intensity / 2.0,
            0.5 + self.intensity / 2.0,
            (1.0 - self.drop_off).min(1.0),
        ]
    }
}

/// Declarative parameter surface mirroring the original widget attributes,
/// loadable from JSON. Maps 1:1 onto [`MaskSpecs`] plus `start_animation`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimmerConfig {
    /// `"#AARRGGBB"` or `"#RRGGBB"`.
    pub mask_color: String,
    pub intensity: f32,
    pub drop_off: f32,
    pub mask_mode: String,
    pub animation_duration: u64,
    pub start_delayed: u64,
    /// Start the sweep immediately once the host is laid out.
    pub start_animation: bool,
}

impl Default for ShimmerConfig {
    fn default() -> Self {
        Self {
            mask_color: format!("#{DEFAULT_MASK_COLOR:08X}"),
            intensity: DEFAULT_INTENSITY,
            drop_off: DEFAULT_DROP_OFF,
            mask_mode: "src_in".to_string(),
            animation_duration: DEFAULT_ANIMATION_DURATION,
            start_delayed: DEFAULT_START_DELAYED,
            start_animation: false,
        }
    }
}

impl ShimmerConfig {
    pub fn to_mask_specs(&self) -> Result<MaskSpecs, ShimmerError> {
        let specs = MaskSpecs {
            mask_color: parse_color(&self.mask_color),
            intensity: self.intensity,
            drop_off: self.drop_off,
            mask_mode: MaskMode::from_name(&self.mask_mode),
            animation_duration: self.animation_duration,
            start_delayed: self.start_delayed,
        };
        specs.validate()?;
        Ok(specs)
    }
}

/// Parses `"#AARRGGBB"` or `"#RRGGBB"` (alpha defaults to `FF`). Malformed
/// input falls back to the default mask color.
fn parse_color(s: &str) -> u32 {
    let hex = s.trim_start_matches('#');
    match hex.len() {
        6 => u32::from_str_radix(hex, 16)
            .map(|rgb| 0xFF00_0000 | rgb)
            .unwrap_or(DEFAULT_MASK_COLOR),
        8 => u32::from_str_radix(hex, 16).unwrap_or(DEFAULT_MASK_COLOR),
        _ => DEFAULT_MASK_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_mode_codes() {
        assert_eq!(MaskMode::from_code(3), MaskMode::SrcIn);
        assert_eq!(MaskMode::from_code(7), MaskMode::SrcAtop);
        assert_eq!(MaskMode::from_code(9), MaskMode::Multiply);
        assert_eq!(MaskMode::from_code(15), MaskMode::Screen);
        // Anything else falls back to the default
        assert_eq!(MaskMode::from_code(-1), MaskMode::SrcIn);
        assert_eq!(MaskMode::from_code(4), MaskMode::SrcIn);
    }

    #[test]
    fn test_mask_mode_names() {
        assert_eq!(MaskMode::from_name("screen"), MaskMode::Screen);
        assert_eq!(MaskMode::from_name("multiply"), MaskMode::Multiply);
        assert_eq!(MaskMode::from_name("src_atop"), MaskMode::SrcAtop);
        assert_eq!(MaskMode::from_name("nonsense"), MaskMode::SrcIn);
    }

    #[test]
    fn test_gradient_positions() {
        let specs = MaskSpecs {
            drop_off: 0.3,
            intensity: 0.0,
            ..MaskSpecs::default()
        };
        assert_eq!(specs.gradient_positions(), [0.3, 0.5, 0.5, 0.7]);

        let specs = MaskSpecs {
            drop_off: 0.0,
            intensity: 1.0,
            ..MaskSpecs::default()
        };
        assert_eq!(specs.gradient_positions(), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_gradient_positions_non_decreasing() {
        for drop_off in [0.0, 0.1, 0.25, 0.5] {
            for intensity in [0.0, 0.3, 0.5, 1.0] {
                let specs = MaskSpecs {
                    drop_off,
                    intensity,
                    ..MaskSpecs::default()
                };
                let p = specs.gradient_positions();
                assert!(
                    p[0] <= p[1] && p[1] <= p[2] && p[2] <= p[3],
                    "positions {p:?} for drop_off={drop_off} intensity={intensity}"
                );
            }
        }
    }

    #[test]
    fn test_zero_duration_rejected() {
        let specs = MaskSpecs {
            animation_duration: 0,
            ..MaskSpecs::default()
        };
        assert!(matches!(
            specs.validate(),
            Err(ShimmerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#FFDDDDDD"), 0xFFDD_DDDD);
        assert_eq!(parse_color("#102030"), 0xFF10_2030);
        assert_eq!(parse_color("oops"), DEFAULT_MASK_COLOR);
    }

    #[test]
    fn test_config_to_specs() {
        let json = r##"{
            "mask_color": "#FF336699",
            "intensity": 0.2,
            "drop_off": 0.4,
            "mask_mode": "screen",
            "animation_duration": 800,
            "start_delayed": 100,
            "start_animation": true
        }"##;
        let config: ShimmerConfig = serde_json::from_str(json).unwrap();
        let specs = config.to_mask_specs().unwrap();
        assert_eq!(specs.mask_color, 0xFF33_6699);
        assert_eq!(specs.mask_mode, MaskMode::Screen);
        assert_eq!(specs.animation_duration, 800);
        assert_eq!(specs.start_delayed, 100);
        assert!(config.start_animation);
    }

    #[test]
    fn test_config_defaults() {
        let config: ShimmerConfig = serde_json::from_str("{}").unwrap();
        let specs = config.to_mask_specs().unwrap();
        assert_eq!(specs, MaskSpecs::default());
        assert!(!config.start_animation);
    }
}
