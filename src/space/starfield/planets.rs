// ============================================
// Planets - Статический каталог планет
// ============================================
// Не генерируются и не участвуют в чанках.

use serde::{Deserialize, Serialize};
use ultraviolet::DVec3;

/// Описание планеты (как в JSON конфиге)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetDef {
    pub name: String,
    pub position: [f64; 3],
    pub radius: f64,
    /// "#rgb" или "#rrggbb"
    pub color: String,
}

/// Планета, готовая к отрисовке
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub name: String,
    pub position: DVec3,
    pub radius: f64,
    pub color: [f32; 4],
}

impl Planet {
    pub fn from_def(def: &PlanetDef) -> Result<Self, String> {
        let color = parse_hex_color(&def.color)
            .ok_or_else(|| format!("planet '{}': bad color '{}'", def.name, def.color))?;
        Ok(Self {
            name: def.name.clone(),
            position: DVec3::new(def.position[0], def.position[1], def.position[2]),
            radius: def.radius,
            color,
        })
    }

    /// Камера "у планеты" - ближе двух радиусов
    pub fn is_near(&self, point: DVec3) -> bool {
        (self.position - point).mag() < self.radius * 2.0
    }
}

/// Каталог по умолчанию
pub fn default_planets() -> Vec<PlanetDef> {
    vec![
        PlanetDef {
            name: "Azulon".to_string(),
            position: [0.0, 0.0, 300.0],
            radius: 10.0,
            color: "#0cf".to_string(),
        },
        PlanetDef {
            name: "Fulgor".to_string(),
            position: [100.0, 20.0, 600.0],
            radius: 20.0,
            color: "#f80".to_string(),
        },
    ]
}

/// "#0cf" / "#00ccff" -> RGBA (0..1)
pub fn parse_hex_color(s: &str) -> Option<[f32; 4]> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |h: &str| u8::from_str_radix(h, 16).ok().map(|v| v as f32 / 255.0);

    match hex.len() {
        3 => {
            let mut out = [1.0; 4];
            for (i, c) in hex.chars().enumerate() {
                let d = c.to_digit(16)? as f32;
                out[i] = d * 17.0 / 255.0;
            }
            Some(out)
        }
        6 => Some([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            1.0,
        ]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_hex_agree() {
        assert_eq!(parse_hex_color("#0cf"), parse_hex_color("#00ccff"));
        assert_eq!(parse_hex_color("#f80"), Some([1.0, 136.0 / 255.0, 0.0, 1.0]));
    }

    #[test]
    fn bad_colors_are_rejected() {
        for bad in ["0cf", "#0c", "#zzz", "#12345", "", "#ффф"] {
            assert_eq!(parse_hex_color(bad), None, "{}", bad);
        }
    }

    #[test]
    fn default_catalog_builds() {
        let planets: Vec<Planet> = default_planets()
            .iter()
            .map(Planet::from_def)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(planets.len(), 2);
        assert_eq!(planets[0].name, "Azulon");
        assert_eq!(planets[1].position, DVec3::new(100.0, 20.0, 600.0));
    }

    #[test]
    fn proximity_uses_twice_the_radius() {
        let p = Planet::from_def(&default_planets()[0]).unwrap();
        assert!(p.is_near(DVec3::new(0.0, 0.0, 281.0)));
        assert!(!p.is_near(DVec3::new(0.0, 0.0, 280.0)));
    }
}
