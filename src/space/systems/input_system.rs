// ============================================
// Input System - Обработка ввода
// ============================================
// Клавиши полёта идут в снимок ввода контроллера,
// мышь/колесо - в контроллер и регулятор тяги.

use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta},
    keyboard::KeyCode,
    window::CursorGrabMode,
};

use crate::space::core::SpaceResources;

/// Система обработки ввода
pub struct InputSystem;

impl InputSystem {
    /// Обработка клавиатурного ввода
    pub fn process_keyboard(
        resources: &mut SpaceResources,
        keycode: KeyCode,
        state: ElementState,
    ) -> Option<InputAction> {
        let pressed = state == ElementState::Pressed;

        match keycode {
            // Escape - отпустить курсор
            KeyCode::Escape if pressed => {
                Self::grab_cursor(resources, false);
                Some(InputAction::ReleaseCursor)
            }
            _ => {
                resources.simulation.controller_mut().process_keyboard(keycode, pressed);
                None
            }
        }
    }

    /// Обработка кнопок мыши
    pub fn process_mouse_button(
        resources: &mut SpaceResources,
        button: MouseButton,
        state: ElementState,
    ) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match button {
            MouseButton::Left if !resources.cursor_grabbed => {
                Self::grab_cursor(resources, true);
                Some(InputAction::GrabCursor)
            }
            MouseButton::Middle => {
                resources.simulation.throttle_mut().toggle_turbo();
                Some(InputAction::ToggleTurbo)
            }
            _ => None,
        }
    }

    /// Обработка движения мыши
    pub fn process_mouse_motion(resources: &mut SpaceResources, delta: (f64, f64)) {
        if resources.cursor_grabbed {
            resources.simulation.controller_mut().process_mouse(delta.0, delta.1);
        }
    }

    /// Обработка колеса мыши: важен только знак
    pub fn process_mouse_wheel(resources: &mut SpaceResources, delta: MouseScrollDelta) {
        let scroll = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(pos) => pos.y,
        };
        resources.simulation.throttle_mut().scroll(scroll);
    }

    /// Потеря фокуса: отпустить все клавиши и курсор
    pub fn release_all(resources: &mut SpaceResources) {
        resources.simulation.controller_mut().input.release_all();
        Self::grab_cursor(resources, false);
    }

    /// Захват/освобождение курсора
    pub fn grab_cursor(resources: &mut SpaceResources, grab: bool) {
        resources.cursor_grabbed = grab;
        if let Some(window) = &resources.window {
            if grab {
                let _ = window.set_cursor_grab(CursorGrabMode::Locked)
                    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
                window.set_cursor_visible(false);
            } else {
                let _ = window.set_cursor_grab(CursorGrabMode::None);
                window.set_cursor_visible(true);
            }
        }
        log::debug!("[INPUT] курсор захвачен: {}", grab);
    }
}

/// Действия, которые могут быть вызваны вводом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    GrabCursor,
    ReleaseCursor,
    ToggleTurbo,
}
