use eframe::egui::{Color32, Stroke};

use crate::keywords::{Difficulty, KeywordRecord, SearchIntent};

pub const MIN_FONT_SIZE: f32 = 12.0;
pub const STROKE_DASH_LENGTH: f32 = 4.0;
pub const STROKE_GAP_LENGTH: f32 = 2.0;
pub const LABEL_COLOR: Color32 = Color32::from_rgb(0x44, 0x47, 0x6a);

const HIGH_DIFFICULTY_STROKE: Stroke = Stroke {
    width: 2.0,
    color: Color32::from_rgb(0x33, 0x33, 0x33),
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleStyle {
    pub fill: Color32,
    pub opacity: f32,
    pub stroke: Option<Stroke>,
    pub font_size: f32,
}

pub fn intent_color(intent: SearchIntent) -> Color32 {
    match intent {
        SearchIntent::Informational => Color32::from_rgb(0x6d, 0x5d, 0xfc),
        SearchIntent::Navigational => Color32::from_rgb(0x00, 0xb4, 0xd8),
        SearchIntent::Transactional => Color32::from_rgb(0x2e, 0xcc, 0x71),
        SearchIntent::Commercial => Color32::from_rgb(0xf3, 0x9c, 0x12),
    }
}

pub fn difficulty_opacity(difficulty: Difficulty) -> f32 {
    match difficulty {
        Difficulty::Low => 1.0,
        Difficulty::Medium => 0.8,
        Difficulty::High => 0.6,
    }
}

pub fn label_font_size(radius: f32) -> f32 {
    (radius / 2.0).max(MIN_FONT_SIZE)
}

pub fn bubble_style(record: &KeywordRecord, radius: f32) -> BubbleStyle {
    BubbleStyle {
        fill: intent_color(record.search_intent),
        opacity: difficulty_opacity(record.difficulty),
        stroke: (record.difficulty == Difficulty::High).then_some(HIGH_DIFFICULTY_STROKE),
        font_size: label_font_size(radius),
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::Color32;

    use super::{bubble_style, difficulty_opacity, intent_color, label_font_size};
    use crate::keywords::{Difficulty, KeywordRecord, SearchIntent};

    fn record(intent: SearchIntent, difficulty: Difficulty) -> KeywordRecord {
        KeywordRecord {
            text: "kw".to_owned(),
            size: 500.0,
            importance_score: 50.0,
            search_intent: intent,
            difficulty,
            variations: Vec::new(),
        }
    }

    #[test]
    fn intent_colors_match_fixed_table() {
        assert_eq!(
            intent_color(SearchIntent::Informational),
            Color32::from_rgb(0x6d, 0x5d, 0xfc)
        );
        assert_eq!(
            intent_color(SearchIntent::Navigational),
            Color32::from_rgb(0x00, 0xb4, 0xd8)
        );
        assert_eq!(
            intent_color(SearchIntent::Transactional),
            Color32::from_rgb(0x2e, 0xcc, 0x71)
        );
        assert_eq!(
            intent_color(SearchIntent::Commercial),
            Color32::from_rgb(0xf3, 0x9c, 0x12)
        );
    }

    #[test]
    fn opacity_strictly_decreases_with_difficulty() {
        let low = difficulty_opacity(Difficulty::Low);
        let medium = difficulty_opacity(Difficulty::Medium);
        let high = difficulty_opacity(Difficulty::High);

        assert!(low > medium);
        assert!(medium > high);
    }

    #[test]
    fn only_high_difficulty_gets_a_stroke() {
        assert!(
            bubble_style(&record(SearchIntent::Commercial, Difficulty::Low), 30.0)
                .stroke
                .is_none()
        );
        assert!(
            bubble_style(&record(SearchIntent::Commercial, Difficulty::Medium), 30.0)
                .stroke
                .is_none()
        );
        assert!(
            bubble_style(&record(SearchIntent::Commercial, Difficulty::High), 30.0)
                .stroke
                .is_some()
        );
    }

    #[test]
    fn font_size_is_half_radius_with_floor() {
        assert_eq!(label_font_size(60.0), 30.0);
        assert_eq!(label_font_size(20.0), 12.0);
        assert_eq!(label_font_size(24.0), 12.0);
        assert_eq!(label_font_size(26.0), 13.0);
    }
}
