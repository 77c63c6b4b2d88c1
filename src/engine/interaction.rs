use crate::keywords::KeywordRecord;

use super::Scene;
use super::scene::label_font_size;

pub const HOVER_SCALE: f32 = 1.1;
pub const ACTIVE_MIN_FONT_SIZE: f32 = 14.0;
pub const ACTIVE_FONT_DIVISOR: f32 = 1.8;
pub const TRANSITION_SECS: f32 = 0.3;
pub const TOOLTIP_OFFSET: f32 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationSource {
    Pointer,
    Keyboard,
}

pub struct InteractionController {
    states: Vec<InteractionState>,
    active: Option<(usize, ActivationSource)>,
}

impl InteractionController {
    pub fn new(node_count: usize) -> Self {
        Self {
            states: vec![InteractionState::Idle; node_count],
            active: None,
        }
    }

    pub fn pointer_enter(&mut self, index: usize) {
        self.activate(index, ActivationSource::Pointer);
    }

    pub fn pointer_leave(&mut self, index: usize) {
        self.deactivate(index);
    }

    pub fn focus_gained(&mut self, index: usize) {
        self.activate(index, ActivationSource::Keyboard);
    }

    pub fn focus_lost(&mut self, index: usize) {
        self.deactivate(index);
    }

    pub fn state(&self, index: usize) -> InteractionState {
        self.states
            .get(index)
            .copied()
            .unwrap_or(InteractionState::Idle)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.map(|(index, _)| index)
    }

    pub fn tooltip(&self, scene: &Scene) -> Option<TooltipContent> {
        let (index, source) = self.active?;
        let node = scene.nodes.get(index)?;
        Some(TooltipContent::for_record(&node.record, source))
    }

    fn activate(&mut self, index: usize, source: ActivationSource) {
        if index >= self.states.len() {
            return;
        }

        if let Some((previous, _)) = self.active
            && previous != index
            && let Some(state) = self.states.get_mut(previous)
        {
            *state = InteractionState::Idle;
        }

        self.states[index] = InteractionState::Active;
        self.active = Some((index, source));
    }

    fn deactivate(&mut self, index: usize) {
        let Some(state) = self.states.get_mut(index) else {
            return;
        };

        *state = InteractionState::Idle;
        if self.active_index() == Some(index) {
            self.active = None;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderProps {
    pub radius: f32,
    pub font_size: f32,
    pub emphasized: bool,
}

pub fn render_props(base_radius: f32, state: InteractionState) -> RenderProps {
    match state {
        InteractionState::Idle => RenderProps {
            radius: base_radius,
            font_size: label_font_size(base_radius),
            emphasized: false,
        },
        InteractionState::Active => RenderProps {
            radius: base_radius * HOVER_SCALE,
            font_size: (base_radius / ACTIVE_FONT_DIVISOR).max(ACTIVE_MIN_FONT_SIZE),
            emphasized: true,
        },
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent {
    pub title: String,
    pub intent: String,
    pub difficulty: String,
    pub variations: String,
    pub source: ActivationSource,
}

impl TooltipContent {
    pub fn for_record(record: &KeywordRecord, source: ActivationSource) -> Self {
        let variations = if record.variations.is_empty() {
            "No variations".to_owned()
        } else {
            record.variations.join(", ")
        };

        Self {
            title: record.text.clone(),
            intent: format!("Intent: {}", record.search_intent.label()),
            difficulty: format!("Difficulty: {}", record.difficulty.label()),
            variations: format!("Variations: {variations}"),
            source,
        }
    }
}
