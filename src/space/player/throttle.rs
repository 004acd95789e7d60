// ============================================
// Throttle - Множитель ускорения (обычный / турбо)
// ============================================
// Колесо мыши - шаг мощности
// Средняя кнопка - турбо (x8 / ÷8 с сохранением текущего уровня)

use crate::space::core::SpaceConfig;

/// Режим тяги
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrustMode {
    Normal,
    Turbo,
}

/// Границы и шаг одного режима
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrottleRegime {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Предельная скорость
    pub max_speed: f64,
    /// Торможение (единиц/с²)
    pub decel: f64,
}

/// Снимок состояния для HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrottleState {
    pub acc_factor: f64,
    pub mode: ThrustMode,
    pub regime: ThrottleRegime,
}

impl ThrottleState {
    /// Число делений шкалы мощности
    pub fn total_segments(&self) -> u32 {
        ((self.regime.max - self.regime.min) / self.regime.step).floor().max(0.0) as u32
    }

    /// Число горящих делений
    pub fn lit_segments(&self) -> u32 {
        ((self.acc_factor - self.regime.min) / self.regime.step).floor().max(0.0) as u32
    }

    pub fn is_turbo(&self) -> bool {
        self.mode == ThrustMode::Turbo
    }
}

/// Регулятор ускорения
#[derive(Debug, Clone)]
pub struct Throttle {
    acc_factor: f64,
    mode: ThrustMode,
    normal: ThrottleRegime,
    turbo: ThrottleRegime,
    multiplier: f64,
}

impl Throttle {
    pub fn new(config: &SpaceConfig) -> Self {
        let normal = ThrottleRegime {
            min: config.normal_acc_min,
            max: config.normal_acc_max,
            step: config.wheel_step,
            max_speed: config.max_speed_normal,
            decel: config.base_decel,
        };
        let turbo = ThrottleRegime {
            min: config.turbo_acc_min,
            max: config.turbo_acc_max,
            step: config.wheel_step * config.turbo_multiplier,
            max_speed: config.max_speed_turbo,
            decel: config.base_decel * config.turbo_multiplier,
        };

        Self {
            acc_factor: config.initial_acc_factor.clamp(normal.min, normal.max),
            mode: ThrustMode::Normal,
            normal,
            turbo,
            multiplier: config.turbo_multiplier,
        }
    }

    pub fn acc_factor(&self) -> f64 {
        self.acc_factor
    }

    pub fn mode(&self) -> ThrustMode {
        self.mode
    }

    pub fn is_turbo(&self) -> bool {
        self.mode == ThrustMode::Turbo
    }

    /// Параметры текущего режима
    pub fn regime(&self) -> &ThrottleRegime {
        match self.mode {
            ThrustMode::Normal => &self.normal,
            ThrustMode::Turbo => &self.turbo,
        }
    }

    pub fn state(&self) -> ThrottleState {
        ThrottleState {
            acc_factor: self.acc_factor,
            mode: self.mode,
            regime: *self.regime(),
        }
    }

    /// Переключить турбо. Текущий уровень масштабируется, а не сбрасывается.
    pub fn toggle_turbo(&mut self) {
        let (mode, scaled) = match self.mode {
            ThrustMode::Normal => (ThrustMode::Turbo, self.acc_factor * self.multiplier),
            ThrustMode::Turbo => (ThrustMode::Normal, self.acc_factor / self.multiplier),
        };
        self.mode = mode;
        let regime = *self.regime();
        self.acc_factor = scaled.clamp(regime.min, regime.max);
        log::info!("[THROTTLE] {:?}, множитель {}", self.mode, self.acc_factor);
    }

    /// Прокрутка колеса: учитывается только знак
    pub fn scroll(&mut self, delta: f64) {
        if delta == 0.0 || delta.is_nan() {
            return;
        }
        let regime = *self.regime();
        self.acc_factor = (self.acc_factor + delta.signum() * regime.step).clamp(regime.min, regime.max);
        log::debug!("[THROTTLE] множитель {}", self.acc_factor);
    }
}
