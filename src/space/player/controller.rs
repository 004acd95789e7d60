// ============================================
// Ship Controller - Ввод и движение корабля
// ============================================
// W/S - вперёд/назад, A/D - влево/вправо, R/F - вверх/вниз
// Q/E - крен, Shift - тормоз, мышь - рыскание/тангаж

use ultraviolet::DVec3;
use winit::keyboard::KeyCode;

use crate::space::core::SpaceConfig;
use crate::space::math::{Orientation, Quat};
use super::ship::Ship;
use super::throttle::Throttle;

/// Снимок ввода, читается один раз в начале тика
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub roll_left: bool,
    pub roll_right: bool,
    pub brake: bool,

    /// Накопленное движение мыши с прошлого тика (пиксели)
    pub mouse_dx: f64,
    pub mouse_dy: f64,
}

impl InputState {
    /// Единичное направление тяги в локальных координатах (или ноль)
    pub fn local_direction(&self) -> DVec3 {
        let mut dir = DVec3::zero();
        if self.forward { dir.z += 1.0; }
        if self.backward { dir.z -= 1.0; }
        if self.left { dir.x -= 1.0; }
        if self.right { dir.x += 1.0; }
        if self.up { dir.y += 1.0; }
        if self.down { dir.y -= 1.0; }

        if dir.mag_sq() > 0.0 {
            dir.normalized()
        } else {
            dir
        }
    }

    /// Сбросить удержание клавиш (например, при потере фокуса)
    pub fn release_all(&mut self) {
        *self = Self {
            mouse_dx: self.mouse_dx,
            mouse_dy: self.mouse_dy,
            ..Self::default()
        };
    }
}

/// Один шаг торможения против текущей скорости.
/// Если шаг "перелетает" ноль и модуль растёт - скорость обнуляется.
pub fn brake_step(velocity: DVec3, decel: f64, dt: f64) -> DVec3 {
    let speed = velocity.mag();
    if speed <= 0.0 {
        return velocity;
    }

    let candidate = velocity - velocity / speed * (decel * dt);
    if candidate.mag() > speed {
        DVec3::zero()
    } else {
        candidate
    }
}

/// Ограничение модуля скорости
pub fn clamp_speed(velocity: DVec3, max_speed: f64) -> DVec3 {
    let speed = velocity.mag();
    if speed > max_speed {
        velocity * (max_speed / speed)
    } else {
        velocity
    }
}

/// Контроллер корабля - обрабатывает ввод и интегрирует движение
pub struct ShipController {
    pub input: InputState,

    /// Радиан на пиксель движения мыши
    pub sensitivity: f64,

    /// Угол крена за тик
    pub roll_step: f64,
}

impl ShipController {
    pub fn new(config: &SpaceConfig) -> Self {
        Self {
            input: InputState::default(),
            sensitivity: config.mouse_sensitivity,
            roll_step: config.roll_step,
        }
    }

    /// Обработка клавиатуры. Возвращает true, если клавиша относится к полёту.
    pub fn process_keyboard(&mut self, key: KeyCode, pressed: bool) -> bool {
        let slot = match key {
            KeyCode::KeyW => &mut self.input.forward,
            KeyCode::KeyS => &mut self.input.backward,
            KeyCode::KeyA => &mut self.input.left,
            KeyCode::KeyD => &mut self.input.right,
            KeyCode::KeyR => &mut self.input.up,
            KeyCode::KeyF => &mut self.input.down,
            KeyCode::KeyQ => &mut self.input.roll_left,
            KeyCode::KeyE => &mut self.input.roll_right,
            KeyCode::ShiftLeft => &mut self.input.brake,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    /// Движение мыши накапливается до следующего тика
    pub fn process_mouse(&mut self, dx: f64, dy: f64) {
        self.input.mouse_dx += dx;
        self.input.mouse_dy += dy;
    }

    pub fn is_braking(&self) -> bool {
        self.input.brake
    }

    /// Обновление корабля за тик
    pub fn update<O: Orientation>(&mut self, ship: &mut Ship<O>, throttle: &Throttle, dt: f64) {
        // === Обзор мышью ===
        self.apply_mouse_look(ship);

        // === Тяга / торможение ===
        let regime = throttle.regime();
        if self.input.brake {
            ship.velocity = brake_step(ship.velocity, regime.decel, dt);
        } else {
            let world_dir = ship.orientation.rotate(self.input.local_direction());
            ship.velocity += world_dir * (throttle.acc_factor() * dt);
            ship.velocity = clamp_speed(ship.velocity, regime.max_speed);
        }

        // === Крен ===
        self.apply_roll(ship);

        // === Интегрирование ===
        ship.integrate(dt);
    }

    /// Рыскание вокруг текущего "верха", тангаж вокруг текущего "права".
    /// Итог: pitch * (yaw * old).
    fn apply_mouse_look<O: Orientation>(&mut self, ship: &mut Ship<O>) {
        let dx = self.input.mouse_dx;
        let dy = self.input.mouse_dy;
        self.input.mouse_dx = 0.0;
        self.input.mouse_dy = 0.0;

        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let up = ship.orientation.rotate(DVec3::unit_y());
        let right = ship.orientation.rotate(DVec3::unit_x());
        let yaw = Quat::from_axis_angle(up, dx * self.sensitivity);
        let pitch = Quat::from_axis_angle(right, dy * self.sensitivity);

        ship.orientation = ship.orientation.compose(pitch * yaw);
    }

    /// Крен вокруг оси взгляда (локальная -Z)
    fn apply_roll<O: Orientation>(&self, ship: &mut Ship<O>) {
        let axis = ship.orientation.rotate(DVec3::new(0.0, 0.0, -1.0));
        if self.input.roll_left {
            ship.orientation = ship.orientation.turned(axis, self.roll_step);
        }
        if self.input.roll_right {
            ship.orientation = ship.orientation.turned(axis, -self.roll_step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::math::EulerAngles;

    const EPS: f64 = 1e-9;

    fn setup() -> (Ship, ShipController, Throttle) {
        let config = SpaceConfig::default();
        (Ship::default(), ShipController::new(&config), Throttle::new(&config))
    }

    #[test]
    fn forward_thrust_from_rest() {
        let (mut ship, mut ctrl, throttle) = setup();
        ctrl.process_keyboard(KeyCode::KeyW, true);
        ctrl.update(&mut ship, &throttle, 1.0);

        assert!((ship.velocity - DVec3::new(0.0, 0.0, 64.0)).mag() < EPS);
        assert!((ship.position - DVec3::new(0.0, 0.0, 64.0)).mag() < EPS);
        assert!((ship.speed - 64.0).abs() < EPS);
    }

    #[test]
    fn diagonal_input_is_normalized() {
        let input = InputState { forward: true, right: true, up: true, ..Default::default() };
        assert!((input.local_direction().mag() - 1.0).abs() < EPS);

        let opposed = InputState { forward: true, backward: true, ..Default::default() };
        assert_eq!(opposed.local_direction(), DVec3::zero());
    }

    #[test]
    fn speed_is_clamped_per_regime() {
        let (mut ship, mut ctrl, mut throttle) = setup();
        ctrl.process_keyboard(KeyCode::KeyW, true);
        for _ in 0..100 {
            ctrl.update(&mut ship, &throttle, 1.0);
        }
        assert!((ship.speed - 512.0).abs() < 1e-6);

        throttle.toggle_turbo();
        for _ in 0..100 {
            ctrl.update(&mut ship, &throttle, 1.0);
        }
        assert!((ship.speed - 2048.0).abs() < 1e-6);
    }

    #[test]
    fn braking_never_increases_speed() {
        for (v, dt) in [
            (DVec3::new(300.0, -20.0, 5.0), 0.016),
            (DVec3::new(1.0, 0.0, 0.0), 0.016),
            (DVec3::new(0.0, 2.0, 2.0), 0.5),
            (DVec3::new(-100.0, 100.0, 100.0), 10.0),
        ] {
            let before = v.mag();
            let after = brake_step(v, 256.0, dt).mag();
            assert!(after <= before, "{} -> {}", before, after);
        }
    }

    #[test]
    fn braking_overshoot_snaps_to_zero() {
        // 1 - 256*0.016 = -3.096 -> модуль растёт -> ноль
        let v = brake_step(DVec3::new(1.0, 0.0, 0.0), 256.0, 0.016);
        assert_eq!(v, DVec3::zero());
    }

    #[test]
    fn braking_at_rest_is_noop() {
        assert_eq!(brake_step(DVec3::zero(), 256.0, 1.0), DVec3::zero());
    }

    #[test]
    fn brake_ignores_thrust_keys() {
        let (mut ship, mut ctrl, throttle) = setup();
        ship.velocity = DVec3::new(0.0, 0.0, 100.0);
        ctrl.process_keyboard(KeyCode::KeyW, true);
        ctrl.process_keyboard(KeyCode::ShiftLeft, true);
        ctrl.update(&mut ship, &throttle, 0.1);
        // 100 - 256 * 0.1
        assert!((ship.velocity.z - 74.4).abs() < EPS);
        assert!(ctrl.is_braking());
    }

    #[test]
    fn mouse_right_turns_view_right() {
        let (mut ship, mut ctrl, throttle) = setup();
        ctrl.process_mouse(100.0, 0.0);
        ctrl.update(&mut ship, &throttle, 0.0);
        let f = ship.orientation.forward();
        assert!(f.x > 0.0);
        assert!(f.y.abs() < EPS);
        assert_eq!(ctrl.input.mouse_dx, 0.0);
    }

    #[test]
    fn mouse_look_applies_yaw_before_pitch() {
        let (mut ship, mut ctrl, throttle) = setup();
        ctrl.process_mouse(300.0, 200.0);
        ctrl.update(&mut ship, &throttle, 0.0);

        let s = 0.002;
        let yaw = Quat::from_axis_angle(DVec3::unit_y(), 300.0 * s);
        let pitch = Quat::from_axis_angle(DVec3::unit_x(), 200.0 * s);
        let expected = (pitch * (yaw * Quat::IDENTITY)).normalized();

        let q = ship.orientation;
        assert!((q.x - expected.x).abs() < EPS && (q.y - expected.y).abs() < EPS);
        assert!((q.z - expected.z).abs() < EPS && (q.w - expected.w).abs() < EPS);
    }

    #[test]
    fn roll_keys_turn_about_view_axis() {
        let (mut ship, mut ctrl, throttle) = setup();
        ctrl.process_keyboard(KeyCode::KeyQ, true);
        ctrl.update(&mut ship, &throttle, 0.016);

        // Ось взгляда неизменна, "верх" повернулся
        assert!((ship.orientation.forward() - DVec3::unit_z()).mag() < EPS);
        let up = ship.orientation.up();
        assert!((up.x - (0.03f64).sin()).abs() < EPS);
        assert!((ship.orientation.norm() - 1.0).abs() < EPS);

        ctrl.process_keyboard(KeyCode::KeyE, true);
        let before = ship.orientation;
        ctrl.update(&mut ship, &throttle, 0.016);
        assert!((ship.orientation.up() - before.up()).mag() < 1e-9);
    }

    #[test]
    fn works_with_euler_orientation() {
        let config = SpaceConfig::default();
        let mut ship: Ship<EulerAngles> = Ship::default();
        let mut ctrl = ShipController::new(&config);
        let throttle = Throttle::new(&config);

        ctrl.process_mouse(-150.0, 0.0);
        ctrl.process_keyboard(KeyCode::KeyW, true);
        ctrl.update(&mut ship, &throttle, 1.0);

        assert!((ship.orientation.yaw + 0.3).abs() < EPS);
        assert!((ship.speed - 64.0).abs() < EPS);
        assert!(ship.velocity.x < 0.0);
    }

    #[test]
    fn unrelated_keys_are_not_consumed() {
        let (_, mut ctrl, _) = setup();
        assert!(!ctrl.process_keyboard(KeyCode::KeyZ, true));
        assert!(ctrl.process_keyboard(KeyCode::KeyR, true));
        assert!(ctrl.input.up);
        ctrl.input.release_all();
        assert!(!ctrl.input.up);
    }
}
