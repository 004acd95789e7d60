// ============================================
// Config - Числовые константы мира и управления
// ============================================
// Data-driven: всё можно переопределить JSON-файлом.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::space::starfield::{default_planets, parse_hex_color, PlanetDef};
use super::error::SpaceError;

/// Файл конфига по умолчанию
pub const CONFIG_FILE: &str = "stardrift.json";

/// Переменная окружения с путём к конфигу
pub const CONFIG_ENV: &str = "STARDRIFT_CONFIG";

/// Все настройки мира
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceConfig {
    // Чанки
    pub chunk_size: f64,
    pub stars_per_chunk: usize,
    /// None - случайный seed при запуске
    pub seed: Option<u64>,

    // Проекция
    pub fov: f64,
    pub near_plane: f64,
    pub depth_epsilon: f64,

    // Тяга
    pub normal_acc_min: f64,
    pub normal_acc_max: f64,
    pub turbo_acc_min: f64,
    pub turbo_acc_max: f64,
    pub wheel_step: f64,
    pub turbo_multiplier: f64,
    pub initial_acc_factor: f64,
    pub base_decel: f64,
    pub max_speed_normal: f64,
    pub max_speed_turbo: f64,

    // Вращение
    pub mouse_sensitivity: f64,
    pub roll_step: f64,

    // Мир
    pub planets: Vec<PlanetDef>,
    pub start_position: [f64; 3],

    // Кадр
    /// Верхняя граница dt за тик (с); None - dt без ограничений
    pub max_tick: Option<f64>,

    // Окно
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        let normal_acc_min = 8.0;
        let normal_acc_max = normal_acc_min * 8.0;

        Self {
            chunk_size: 4096.0,
            stars_per_chunk: 256,
            seed: None,

            fov: 500.0,
            near_plane: 1.0,
            depth_epsilon: 0.0001,

            normal_acc_min,
            normal_acc_max,
            turbo_acc_min: normal_acc_min * 8.0,
            turbo_acc_max: normal_acc_max * 8.0,
            wheel_step: normal_acc_min,
            turbo_multiplier: 8.0,
            initial_acc_factor: 64.0,
            base_decel: normal_acc_max * 4.0,
            max_speed_normal: 512.0,
            max_speed_turbo: 2048.0,

            mouse_sensitivity: 0.002,
            roll_step: 0.03,

            planets: default_planets(),
            start_position: [0.0, 0.0, 0.0],

            max_tick: None,

            window_width: 1280,
            window_height: 720,
        }
    }
}

impl SpaceConfig {
    /// Путь к конфигу: переменная окружения или файл рядом с бинарником
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Загрузить из JSON строки
    pub fn from_json(json: &str) -> Result<Self, SpaceError> {
        let config: SpaceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузить из файла; если файла нет - значения по умолчанию
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, SpaceError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("[CONFIG] {} не найден, используются значения по умолчанию", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| SpaceError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        log::info!("[CONFIG] загружен {}", path.display());
        Ok(config)
    }

    /// Проверка согласованности
    pub fn validate(&self) -> Result<(), SpaceError> {
        let invalid = |msg: String| Err(SpaceError::InvalidConfig(msg));

        if !(self.chunk_size > 0.0 && self.chunk_size.is_finite()) {
            return invalid(format!("chunk_size must be positive, got {}", self.chunk_size));
        }
        if self.stars_per_chunk == 0 {
            return invalid("stars_per_chunk must be at least 1".to_string());
        }
        if !(self.fov > 0.0) {
            return invalid(format!("fov must be positive, got {}", self.fov));
        }
        if !(self.wheel_step > 0.0) || !(self.turbo_multiplier > 0.0) {
            return invalid("wheel_step and turbo_multiplier must be positive".to_string());
        }
        if self.normal_acc_min > self.normal_acc_max || self.turbo_acc_min > self.turbo_acc_max {
            return invalid("acceleration bounds are inverted".to_string());
        }
        if self.max_speed_normal < 0.0 || self.max_speed_turbo < 0.0 || self.base_decel < 0.0 {
            return invalid("speed caps and deceleration must not be negative".to_string());
        }
        if let Some(max_tick) = self.max_tick {
            if !(max_tick > 0.0 && max_tick.is_finite()) {
                return invalid(format!("max_tick must be positive, got {}", max_tick));
            }
        }
        if self.window_width == 0 || self.window_height == 0 {
            return invalid("window size must be non-zero".to_string());
        }
        for planet in &self.planets {
            if parse_hex_color(&planet.color).is_none() {
                return invalid(format!("planet '{}' has bad color '{}'", planet.name, planet.color));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_tuning() {
        let c = SpaceConfig::default();
        assert_eq!(c.normal_acc_max, 64.0);
        assert_eq!(c.turbo_acc_min, 64.0);
        assert_eq!(c.turbo_acc_max, 512.0);
        assert_eq!(c.base_decel, 256.0);
        assert_eq!(c.planets.len(), 2);
        assert_eq!(c.max_tick, None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_overrides_only_given_fields() {
        let c = SpaceConfig::from_json(r#"{ "chunk_size": 1024.0, "seed": 99 }"#).unwrap();
        assert_eq!(c.chunk_size, 1024.0);
        assert_eq!(c.seed, Some(99));
        assert_eq!(c.stars_per_chunk, 256);
        assert_eq!(c.fov, 500.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for json in [
            r#"{ "chunk_size": 0.0 }"#,
            r#"{ "stars_per_chunk": 0 }"#,
            r#"{ "normal_acc_min": 100.0 }"#,
            r#"{ "wheel_step": 0.0 }"#,
            r#"{ "max_tick": -0.5 }"#,
            r#"{ "planets": [{ "name": "X", "position": [0,0,0], "radius": 1, "color": "red" }] }"#,
        ] {
            assert!(matches!(SpaceConfig::from_json(json), Err(SpaceError::InvalidConfig(_))), "{}", json);
        }
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(SpaceConfig::from_json("{ nope"), Err(SpaceError::ConfigParse(_))));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let c = SpaceConfig::load_or_default("definitely/not/here/stardrift.json").unwrap();
        assert_eq!(c, SpaceConfig::default());
    }

    #[test]
    fn file_roundtrip() {
        let path = std::env::temp_dir().join("stardrift_config_test.json");
        let mut c = SpaceConfig::default();
        c.seed = Some(5);
        c.stars_per_chunk = 16;
        fs::write(&path, serde_json::to_string_pretty(&c).unwrap()).unwrap();

        let loaded = SpaceConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded, c);

        fs::remove_file(&path).ok();
    }
}
