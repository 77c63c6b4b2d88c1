use eframe::egui::{self, Align2, Color32, FontId, Key, Rect, Sense, Shape, Ui, vec2};

use crate::engine::Viewport;
use crate::engine::describe;
use crate::engine::interaction::{
    ActivationSource, InteractionState, TOOLTIP_OFFSET, TRANSITION_SECS, render_props,
};
use crate::engine::scene::{LABEL_COLOR, STROKE_DASH_LENGTH, STROKE_GAP_LENGTH};

use super::ViewModel;

const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(0xe4, 0xeb, 0xf5);
const EMPHASIS_COLOR: Color32 = Color32::from_rgb(0x2f, 0x32, 0x52);
const DASH_SEGMENTS: usize = 64;

impl ViewModel {
    pub(super) fn draw_bubbles(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let now = ui.input(|input| input.time);

        if let Some(viewport) = self
            .resize
            .observe(Viewport::new(rect.width(), rect.height()), now)
        {
            self.engine.set_viewport(viewport);
        }
        if self.resize.is_settling() {
            ui.ctx().request_repaint();
        }
        self.engine.pump();

        if self.engine.revision() != self.seen_revision {
            self.seen_revision = self.engine.revision();
            self.hovered = None;
            self.focused = None;
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, CANVAS_BACKGROUND);

        let description = self.engine.description();
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Other, true, description.as_str())
        });

        if self.engine.scene().is_empty() {
            painter.text(
                rect.center() - vec2(0.0, 14.0),
                Align2::CENTER_CENTER,
                "Discover SEO keywords visually",
                FontId::proportional(20.0),
                LABEL_COLOR,
            );
            painter.text(
                rect.center() + vec2(0.0, 14.0),
                Align2::CENTER_CENTER,
                "Load a keyword file to see the word bubble view",
                FontId::proportional(14.0),
                LABEL_COLOR.gamma_multiply(0.7),
            );
            return;
        }

        if response.clicked() {
            response.request_focus();
        }
        self.handle_keyboard(ui, &response);

        self.pointer = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pos| rect.contains(*pos));
        let hovered = self.hovered_index(rect);
        if hovered != self.hovered {
            if let Some(previous) = self.hovered {
                self.engine.interaction_mut().pointer_leave(previous);
            }
            if let Some(index) = hovered {
                self.engine.interaction_mut().pointer_enter(index);
            }
            self.hovered = hovered;
        }

        if self.hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let ctx = ui.ctx().clone();
        let scene = self.engine.scene();
        let controller = self.engine.interaction();
        let mut any_active = false;

        for (index, (node, style)) in scene.nodes.iter().zip(scene.styles.iter()).enumerate() {
            let state = controller.state(index);
            any_active |= state == InteractionState::Active;

            let props = render_props(node.radius, state);
            let radius = ctx.animate_value_with_time(
                ui.make_persistent_id(("bubble-radius", index)),
                props.radius,
                TRANSITION_SECS,
            );
            let font_size = ctx.animate_value_with_time(
                ui.make_persistent_id(("bubble-font", index)),
                props.font_size,
                TRANSITION_SECS,
            );

            let center = rect.min + node.pos;
            let fill = Color32::from_rgba_unmultiplied(
                style.fill.r(),
                style.fill.g(),
                style.fill.b(),
                (style.opacity * 255.0).round() as u8,
            );
            painter.circle_filled(center, radius, fill);

            if let Some(stroke) = style.stroke {
                let points = (0..=DASH_SEGMENTS)
                    .map(|segment| {
                        let angle =
                            ((segment as f32) / (DASH_SEGMENTS as f32)) * std::f32::consts::TAU;
                        center + (vec2(angle.cos(), angle.sin()) * radius)
                    })
                    .collect::<Vec<_>>();
                painter.extend(Shape::dashed_line(
                    &points,
                    stroke,
                    STROKE_DASH_LENGTH,
                    STROKE_GAP_LENGTH,
                ));
            }

            let label_color = if props.emphasized {
                EMPHASIS_COLOR
            } else {
                LABEL_COLOR
            };
            painter.text(
                center,
                Align2::CENTER_CENTER,
                &node.record.text,
                FontId::proportional(font_size),
                label_color,
            );
        }

        if let Some(index) = self.hovered.or(self.focused)
            && let Some(node) = scene.nodes.get(index)
        {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                describe::node_label(&node.record),
                FontId::proportional(13.0),
                LABEL_COLOR,
            );
        }

        if any_active {
            ctx.request_repaint();
        }

        self.draw_tooltip(ui, rect);
    }

    fn handle_keyboard(&mut self, ui: &Ui, response: &egui::Response) {
        let count = self.engine.scene().len();
        let previous = self.focused;

        if response.has_focus() && count > 0 {
            let forward = ui.input(|input| {
                input.key_pressed(Key::ArrowRight) || input.key_pressed(Key::ArrowDown)
            });
            let backward = ui.input(|input| {
                input.key_pressed(Key::ArrowLeft) || input.key_pressed(Key::ArrowUp)
            });

            if ui.input(|input| input.key_pressed(Key::Escape)) {
                self.focused = None;
            } else if forward {
                self.focused = Some(self.focused.map_or(0, |index| (index + 1) % count));
            } else if backward {
                self.focused =
                    Some(self.focused.map_or(count - 1, |index| (index + count - 1) % count));
            }
        } else {
            self.focused = None;
        }

        if previous != self.focused {
            if let Some(index) = previous {
                self.engine.interaction_mut().focus_lost(index);
            }
            if let Some(index) = self.focused {
                self.engine.interaction_mut().focus_gained(index);
            }
        }
    }

    fn hovered_index(&self, rect: Rect) -> Option<usize> {
        let pointer = self.pointer?;
        self.engine
            .scene()
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let center = rect.min + node.pos;
                let distance = center.distance(pointer);
                (distance <= node.radius).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    fn draw_tooltip(&self, ui: &Ui, rect: Rect) {
        let scene = self.engine.scene();
        let Some(tooltip) = self.engine.interaction().tooltip(scene) else {
            return;
        };

        let anchor = match tooltip.source {
            ActivationSource::Pointer => {
                let Some(pointer) = self.pointer else {
                    return;
                };
                pointer + vec2(TOOLTIP_OFFSET, TOOLTIP_OFFSET)
            }
            ActivationSource::Keyboard => {
                let Some(index) = self.engine.interaction().active_index() else {
                    return;
                };
                let node = &scene.nodes[index];
                let center = rect.min + node.pos;
                center + vec2(node.radius + TOOLTIP_OFFSET, -node.radius)
            }
        };

        egui::Area::new(egui::Id::new("bubble-tooltip"))
            .fixed_pos(anchor)
            .order(egui::Order::Tooltip)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(250.0);
                    ui.label(egui::RichText::new(tooltip.title.as_str()).strong());
                    ui.label(tooltip.intent.as_str());
                    ui.label(tooltip.difficulty.as_str());
                    ui.label(tooltip.variations.as_str());
                });
            });
    }
}
