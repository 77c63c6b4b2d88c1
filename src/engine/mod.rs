use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui::{Vec2, vec2};

use crate::keywords::KeywordRecord;

pub mod describe;
pub mod export;
pub mod interaction;
pub mod resize;
pub mod scale;
pub mod scene;
pub mod simulation;

use interaction::InteractionController;
use resize::{ResizeListener, ResizeNotifier, ResizeSubscription};
use scene::BubbleStyle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Vec2 {
        vec2(self.width * 0.5, self.height * 0.5)
    }

    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }
}

#[derive(Clone, Debug)]
pub struct BubbleNode {
    pub record: KeywordRecord,
    pub radius: f32,
    pub pos: Vec2,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub viewport: Viewport,
    pub nodes: Vec<BubbleNode>,
    pub styles: Vec<BubbleStyle>,
}

impl Scene {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

pub fn build_scene(records: &[KeywordRecord], viewport: Viewport, seed: u64) -> Scene {
    let radii = scale::scale_radii(records, viewport);
    let positions = simulation::run_layout(&radii, viewport, seed);

    let nodes = records
        .iter()
        .zip(radii)
        .zip(positions)
        .map(|((record, radius), pos)| BubbleNode {
            record: record.clone(),
            radius,
            pos,
        })
        .collect::<Vec<_>>();
    let styles = nodes
        .iter()
        .map(|node| scene::bubble_style(&node.record, node.radius))
        .collect();

    Scene {
        viewport,
        nodes,
        styles,
    }
}

pub struct Engine {
    records: Vec<KeywordRecord>,
    viewport: Viewport,
    seed: u64,
    revision: u64,
    scene: Scene,
    interaction: InteractionController,
    resize: Option<ResizeBinding>,
}

struct ResizeBinding {
    pending: Rc<RefCell<Option<Viewport>>>,
    _subscription: ResizeSubscription,
}

impl Engine {
    pub fn new(records: Vec<KeywordRecord>, viewport: Viewport, seed: u64) -> Self {
        let scene = build_scene(&records, viewport, seed);
        let interaction = InteractionController::new(scene.len());

        Self {
            records,
            viewport,
            seed,
            revision: 0,
            scene,
            interaction,
            resize: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn records(&self) -> &[KeywordRecord] {
        &self.records
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn description(&self) -> String {
        describe::scene_description(&self.records)
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut InteractionController {
        &mut self.interaction
    }

    pub fn set_records(&mut self, records: Vec<KeywordRecord>) {
        self.records = records;
        self.recompute();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }

        self.viewport = viewport;
        self.recompute();
    }

    pub fn observe_resizes(&mut self, notifier: Rc<dyn ResizeNotifier>) {
        let pending = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&pending);
        let listener: ResizeListener = Rc::new(RefCell::new(move |viewport| {
            *sink.borrow_mut() = Some(viewport);
        }));

        self.resize = Some(ResizeBinding {
            pending,
            _subscription: ResizeSubscription::new(notifier, listener),
        });
    }

    pub fn stop_observing(&mut self) {
        self.resize = None;
    }

    pub fn pump(&mut self) -> bool {
        let pending = match &self.resize {
            Some(binding) => binding.pending.borrow_mut().take(),
            None => None,
        };

        let Some(viewport) = pending else {
            return false;
        };

        let before = self.revision;
        self.set_viewport(viewport);
        self.revision != before
    }

    fn recompute(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.scene = build_scene(&self.records, self.viewport, self.seed);
        self.interaction = InteractionController::new(self.scene.len());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::resize::{ResizeListener, ResizeNotifier};
    use super::{Engine, Viewport, build_scene};
    use crate::keywords::{Difficulty, KeywordRecord, SearchIntent};

    fn record(text: &str, size: f32) -> KeywordRecord {
        KeywordRecord {
            text: text.to_owned(),
            size,
            importance_score: size / 10.0,
            search_intent: SearchIntent::Informational,
            difficulty: Difficulty::Low,
            variations: Vec::new(),
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        listeners: RefCell<HashMap<u64, ResizeListener>>,
        next_id: RefCell<u64>,
    }

    impl FakeNotifier {
        fn emit(&self, viewport: Viewport) {
            for listener in self.listeners.borrow().values() {
                (listener.borrow_mut())(viewport);
            }
        }

        fn listener_count(&self) -> usize {
            self.listeners.borrow().len()
        }
    }

    impl ResizeNotifier for FakeNotifier {
        fn subscribe(&self, listener: ResizeListener) -> u64 {
            let mut next_id = self.next_id.borrow_mut();
            *next_id += 1;
            self.listeners.borrow_mut().insert(*next_id, listener);
            *next_id
        }

        fn unsubscribe(&self, id: u64) {
            self.listeners.borrow_mut().remove(&id);
        }
    }

    #[test]
    fn same_inputs_produce_identical_scenes() {
        let records = vec![record("a", 200.0), record("b", 600.0), record("c", 900.0)];
        let viewport = Viewport::new(800.0, 600.0);

        let first = build_scene(&records, viewport, 7);
        let second = build_scene(&records, viewport, 7);

        for (a, b) in first.nodes.iter().zip(second.nodes.iter()) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.radius, b.radius);
        }
    }

    #[test]
    fn viewport_change_rescales_but_keeps_styles() {
        let records = vec![record("a", 200.0), record("b", 900.0)];

        let small = build_scene(&records, Viewport::new(400.0, 400.0), 7);
        let large = build_scene(&records, Viewport::new(1200.0, 1200.0), 7);

        assert!(large.nodes[1].radius > small.nodes[1].radius);
        for (a, b) in small.styles.iter().zip(large.styles.iter()) {
            assert_eq!(a.fill, b.fill);
            assert_eq!(a.opacity, b.opacity);
        }
    }

    #[test]
    fn recompute_replaces_scene_and_interaction() {
        let mut engine = Engine::new(
            vec![record("a", 200.0), record("b", 600.0)],
            Viewport::new(800.0, 600.0),
            7,
        );
        engine.interaction_mut().pointer_enter(0);
        assert_eq!(engine.interaction().active_index(), Some(0));

        engine.set_records(vec![record("c", 400.0)]);

        assert_eq!(engine.scene().len(), 1);
        assert_eq!(engine.interaction().active_index(), None);
        assert_eq!(engine.revision(), 1);
    }

    #[test]
    fn unchanged_viewport_does_not_recompute() {
        let mut engine = Engine::new(vec![record("a", 200.0)], Viewport::new(800.0, 600.0), 7);

        engine.set_viewport(Viewport::new(800.0, 600.0));
        assert_eq!(engine.revision(), 0);

        engine.set_viewport(Viewport::new(900.0, 600.0));
        assert_eq!(engine.revision(), 1);
    }

    #[test]
    fn resize_subscription_feeds_pump_and_releases_on_teardown() {
        let notifier = Rc::new(FakeNotifier::default());
        let mut engine = Engine::new(vec![record("a", 200.0)], Viewport::new(800.0, 600.0), 7);

        engine.observe_resizes(Rc::clone(&notifier) as Rc<dyn ResizeNotifier>);
        assert_eq!(notifier.listener_count(), 1);

        notifier.emit(Viewport::new(640.0, 480.0));
        assert!(engine.pump());
        assert_eq!(engine.scene().viewport, Viewport::new(640.0, 480.0));
        assert!(!engine.pump());

        engine.stop_observing();
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn dropping_engine_releases_subscription() {
        let notifier = Rc::new(FakeNotifier::default());
        {
            let mut engine = Engine::new(Vec::new(), Viewport::new(800.0, 600.0), 7);
            engine.observe_resizes(Rc::clone(&notifier) as Rc<dyn ResizeNotifier>);
            assert_eq!(notifier.listener_count(), 1);
        }
        assert_eq!(notifier.listener_count(), 0);
    }
}
