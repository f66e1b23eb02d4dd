use ratatui::style::Color;
use serde::{Deserialize, Deserializer};
use strum::{Display, EnumString};

pub const MAX_LINE: usize = 4;
pub const FOLD_TIP_TEXT: &str = "展开";
pub const EXPAND_TIP_TEXT: &str = " 收起";
/// Spacing placed in front of the fold label when it sits at the end of a line.
const END_TIP_PREFIX: &str = "   ";

/// Where the fold indicator is placed while collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TipGravity {
    /// At the end of the last visible line.
    #[default]
    End,
    /// At the start of a line of its own below the text.
    Start,
}

impl TipGravity {
    /// Maps the numeric attribute form (`0` = end, `1` = start).
    pub fn from_index(index: u64) -> Option<Self> {
        match index {
            0 => Some(TipGravity::End),
            1 => Some(TipGravity::Start),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for TipGravity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Index(u64),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Index(index) => TipGravity::from_index(index).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid tip gravity index: {index}"))
            }),
            // Formats without typed values (ini, env) hand the index over as a string.
            Raw::Name(name) => name
                .parse()
                .ok()
                .or_else(|| name.parse().ok().and_then(TipGravity::from_index))
                .ok_or_else(|| serde::de::Error::custom(format!("invalid tip gravity: {name}"))),
        }
    }
}

/// How the fold affordance is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum IndicatorMode {
    /// A chevron drawn with two line segments.
    #[default]
    Icon,
    /// The fold/expand label drawn as text.
    Text,
}

fn indicator_from_flag<'de, D>(deserializer: D) -> Result<IndicatorMode, D::Error>
where
    D: Deserializer<'de>,
{
    let fold_with_icon = bool::deserialize(deserializer)?;
    Ok(if fold_with_icon {
        IndicatorMode::Icon
    } else {
        IndicatorMode::Text
    })
}

/// Settings of one fold text component.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FoldConfig {
    #[serde(rename = "show_max_line")]
    pub max_lines: usize,
    #[serde(rename = "tip_gravity")]
    pub gravity: TipGravity,
    pub fold_text: String,
    pub expand_text: String,
    pub show_tip_after_expand: bool,
    #[serde(rename = "fold_with_icon", deserialize_with = "indicator_from_flag")]
    pub indicator: IndicatorMode,
    pub tip_color: Color,
    pub icon_color: Color,
    pub icon_size: f32,
    #[serde(rename = "icon_line_width")]
    pub icon_stroke_width: f32,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            max_lines: MAX_LINE,
            gravity: TipGravity::End,
            fold_text: String::from(FOLD_TIP_TEXT),
            expand_text: String::from(EXPAND_TIP_TEXT),
            show_tip_after_expand: false,
            indicator: IndicatorMode::Icon,
            tip_color: Color::White,
            icon_color: Color::Gray,
            icon_size: 1.0,
            icon_stroke_width: 1.0,
        }
    }
}

impl FoldConfig {
    /// Label shown next to the ellipsis while collapsed.
    pub fn fold_label(&self) -> String {
        let text = if self.fold_text.is_empty() {
            FOLD_TIP_TEXT
        } else {
            self.fold_text.as_str()
        };
        match self.gravity {
            TipGravity::End => format!("{END_TIP_PREFIX}{text}"),
            TipGravity::Start => text.to_string(),
        }
    }

    /// Suffix appended to the text while expanded. With an icon the chevron is
    /// the affordance, so the suffix only reserves a single space for it.
    pub fn expand_label(&self) -> String {
        match self.indicator {
            IndicatorMode::Icon => String::from(" "),
            IndicatorMode::Text if self.expand_text.is_empty() => String::from(EXPAND_TIP_TEXT),
            IndicatorMode::Text => self.expand_text.clone(),
        }
    }

    /// Whether the expanded text carries the expand label.
    pub fn shows_expand_label(&self) -> bool {
        self.show_tip_after_expand || self.indicator == IndicatorMode::Icon
    }

    /// Width of the chevron: two strokes of `icon_size` each.
    pub fn icon_width(&self) -> f32 {
        self.icon_size * 2.0
    }

    pub fn icon_height(&self) -> f32 {
        self.icon_size
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = FoldConfig::default();
        assert_eq!(config.max_lines, 4);
        assert_eq!(config.gravity, TipGravity::End);
        assert_eq!(config.indicator, IndicatorMode::Icon);
        assert_eq!(config.fold_label(), "   展开");
        assert_eq!(config.expand_label(), " ");
    }

    #[test]
    fn test_fold_label_without_prefix_at_start() {
        let config = FoldConfig {
            gravity: TipGravity::Start,
            ..FoldConfig::default()
        };
        assert_eq!(config.fold_label(), "展开");
    }

    #[test]
    fn test_empty_labels_fall_back_to_defaults() {
        let config = FoldConfig {
            fold_text: String::new(),
            expand_text: String::new(),
            indicator: IndicatorMode::Text,
            ..FoldConfig::default()
        };
        assert_eq!(config.fold_label(), "   展开");
        assert_eq!(config.expand_label(), " 收起");
    }

    #[rstest]
    #[case("end", TipGravity::End)]
    #[case("START", TipGravity::Start)]
    fn test_gravity_from_str(#[case] name: &str, #[case] expected: TipGravity) {
        assert_eq!(name.parse::<TipGravity>().ok(), Some(expected));
    }

    #[rstest]
    #[case(0, Some(TipGravity::End))]
    #[case(1, Some(TipGravity::Start))]
    #[case(2, None)]
    fn test_gravity_from_index(#[case] index: u64, #[case] expected: Option<TipGravity>) {
        assert_eq!(TipGravity::from_index(index), expected);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_deserialize_attribute_names() {
        let config: FoldConfig = json5::from_str(
            r#"{
                show_max_line: 2,
                tip_gravity: 1,
                fold_text: "more",
                fold_with_icon: false,
                tip_color: "red",
            }"#,
        )
        .unwrap();
        assert_eq!(config.max_lines, 2);
        assert_eq!(config.gravity, TipGravity::Start);
        assert_eq!(config.fold_label(), "more");
        assert_eq!(config.indicator, IndicatorMode::Text);
        assert_eq!(config.tip_color, Color::Red);
        assert_eq!(config.expand_label(), " 收起");
    }
}
