// ============================================
// Simulation - Контекст симуляции одного окна
// ============================================
// Владеет кораблём, вводом, звёздным полем и проектором.
// Тик: ввод -> камера -> чанки -> проекция.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ultraviolet::DVec3;

use crate::space::gui::{GalaxyBackdrop, GalaxyParams};
use crate::space::player::{CameraPose, Ship, ShipController, Throttle, ThrottleState};
use crate::space::render::{ProjectedPoint, Projector};
use crate::space::starfield::{ChunkStore, Planet};
use super::config::SpaceConfig;
use super::error::SpaceError;

/// Видимая звезда после проекции
#[derive(Debug, Clone, Copy)]
pub struct ProjectedStar {
    pub point: ProjectedPoint,
    /// Расстояние до камеры в мире
    pub distance: f64,
}

/// Видимая планета после проекции
#[derive(Debug, Clone)]
pub struct ProjectedPlanet {
    pub name: String,
    pub point: ProjectedPoint,
    pub radius: f64,
    pub color: [f32; 4],
    pub distance: f64,
    /// Камера ближе двух радиусов
    pub near: bool,
}

/// Всё, что нужно HUD и рендеру за кадр
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub pose: CameraPose,
    pub throttle: ThrottleState,
    pub braking: bool,
    pub stars: Vec<ProjectedStar>,
    /// От дальней к ближней
    pub planets: Vec<ProjectedPlanet>,
    pub near_planet: Option<String>,
}

pub struct Simulation {
    config: SpaceConfig,
    ship: Ship,
    controller: ShipController,
    throttle: Throttle,
    starfield: ChunkStore,
    planets: Vec<Planet>,
    projector: Projector,
    galaxy: GalaxyBackdrop,
}

impl Simulation {
    pub fn new(config: SpaceConfig) -> Result<Self, SpaceError> {
        config.validate()?;

        let planets = config
            .planets
            .iter()
            .map(Planet::from_def)
            .collect::<Result<Vec<_>, _>>()
            .map_err(SpaceError::InvalidConfig)?;

        let [x, y, z] = config.start_position;
        let ship: Ship = Ship::new(DVec3::new(x, y, z));

        let mut starfield = ChunkStore::new(&config);
        let center = starfield.update(ship.position);
        log::info!("[CHUNKS] стартовый чанк {:?}, звёзд {}", center, starfield.star_count());

        let mut galaxy_rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };
        let galaxy = GalaxyBackdrop::generate(GalaxyParams::default(), &mut galaxy_rng);

        Ok(Self {
            controller: ShipController::new(&config),
            throttle: Throttle::new(&config),
            projector: Projector::new(&config),
            ship,
            starfield,
            planets,
            galaxy,
            config,
        })
    }

    pub fn config(&self) -> &SpaceConfig {
        &self.config
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn controller(&self) -> &ShipController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ShipController {
        &mut self.controller
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    pub fn throttle_mut(&mut self) -> &mut Throttle {
        &mut self.throttle
    }

    pub fn starfield(&self) -> &ChunkStore {
        &self.starfield
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn galaxy(&self) -> &GalaxyBackdrop {
        &self.galaxy
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projector.resize(width, height);
    }

    /// Один кадр симуляции
    pub fn tick(&mut self, dt: f64) -> FrameOutput {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let dt = match self.config.max_tick {
            Some(max_tick) if dt > max_tick => {
                log::debug!("[APP] dt {:.3} с ограничен до {}", dt, max_tick);
                max_tick
            }
            _ => dt,
        };

        // === Камера ===
        self.controller.update(&mut self.ship, &self.throttle, dt);

        // === Чанки ===
        self.starfield.update(self.ship.position);

        // === Проекция ===
        let pose = self.ship.pose();
        let stars = self.project_stars(&pose);
        let planets = self.project_planets(&pose);
        let near_planet = planets.iter().find(|p| p.near).map(|p| p.name.clone());

        FrameOutput {
            pose,
            throttle: self.throttle.state(),
            braking: self.controller.is_braking(),
            stars,
            planets,
            near_planet,
        }
    }

    fn project_stars(&self, pose: &CameraPose) -> Vec<ProjectedStar> {
        self.starfield
            .stars()
            .filter_map(|star| {
                let point = self.projector.project(star.position, pose);
                point.visible.then(|| ProjectedStar {
                    point,
                    distance: (star.position - pose.position).mag(),
                })
            })
            .collect()
    }

    fn project_planets(&self, pose: &CameraPose) -> Vec<ProjectedPlanet> {
        let mut planets: Vec<ProjectedPlanet> = self
            .planets
            .iter()
            .filter_map(|planet| {
                let point = self.projector.project(planet.position, pose);
                point.visible.then(|| ProjectedPlanet {
                    name: planet.name.clone(),
                    point,
                    radius: planet.radius,
                    color: planet.color,
                    distance: (planet.position - pose.position).mag(),
                    near: planet.is_near(pose.position),
                })
            })
            .collect();

        // Порядок художника
        planets.sort_by(|a, b| b.distance.total_cmp(&a.distance));
        planets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::starfield::{ChunkKey, MAX_RESIDENT_CHUNKS};
    use winit::keyboard::KeyCode;

    fn config() -> SpaceConfig {
        SpaceConfig { seed: Some(7), ..SpaceConfig::default() }
    }

    #[test]
    fn construction_populates_start_neighborhood() {
        let sim = Simulation::new(config()).unwrap();
        assert_eq!(sim.starfield().len(), MAX_RESIDENT_CHUNKS);
        assert_eq!(sim.starfield().star_count(), 27 * 256);
        assert_eq!(sim.galaxy().len(), 512);
    }

    #[test]
    fn forward_thrust_for_one_second() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.controller_mut().process_keyboard(KeyCode::KeyW, true);
        // 10 тиков по 0.1 с
        let mut frame = sim.tick(0.1);
        for _ in 0..9 {
            frame = sim.tick(0.1);
        }
        assert!((sim.ship().velocity - DVec3::new(0.0, 0.0, 64.0)).mag() < 1e-9);
        assert!((frame.pose.speed - 64.0).abs() < 1e-9);
        assert!(!frame.braking);
    }

    #[test]
    fn single_one_second_tick_integrates_full_dt() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.controller_mut().process_keyboard(KeyCode::KeyW, true);
        let frame = sim.tick(1.0);
        assert!((sim.ship().velocity - DVec3::new(0.0, 0.0, 64.0)).mag() < 1e-9);
        assert!((frame.pose.speed - 64.0).abs() < 1e-9);
        assert!((sim.ship().position - DVec3::new(0.0, 0.0, 64.0)).mag() < 1e-9);
    }

    #[test]
    fn configured_max_tick_caps_long_stall() {
        let c = SpaceConfig { max_tick: Some(0.1), ..config() };
        let mut sim = Simulation::new(c).unwrap();
        sim.controller_mut().process_keyboard(KeyCode::KeyW, true);
        let frame = sim.tick(5.0);
        assert!((frame.pose.speed - 6.4).abs() < 1e-9);

        let before = sim.ship().position;
        sim.tick(f64::NAN);
        assert_eq!(sim.ship().position, before);
    }

    #[test]
    fn camera_in_neighbor_chunk_streams_window() {
        let mut c = config();
        c.start_position = [5000.0, 0.0, 0.0];
        let mut sim = Simulation::new(c).unwrap();
        sim.tick(0.0);

        assert_eq!(sim.starfield().center(), Some(ChunkKey::new(1, 0, 0)));
        let mut xs: Vec<i64> = sim.starfield().keys().map(|k| k.x).collect();
        xs.sort();
        xs.dedup();
        assert_eq!(xs, vec![0, 1, 2]);
    }

    #[test]
    fn visible_stars_are_finite_and_ahead() {
        let mut sim = Simulation::new(config()).unwrap();
        let frame = sim.tick(0.016);
        assert!(!frame.stars.is_empty());
        for s in &frame.stars {
            assert!(s.point.visible && s.point.depth > 1.0);
            assert!(s.point.x.is_finite() && s.point.y.is_finite());
            assert!(s.distance >= s.point.depth - 1e-9);
        }
    }

    #[test]
    fn planets_come_farthest_first() {
        let mut sim = Simulation::new(config()).unwrap();
        let frame = sim.tick(0.0);
        let names: Vec<&str> = frame.planets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Fulgor", "Azulon"]);
        assert_eq!(frame.near_planet, None);
    }

    #[test]
    fn near_planet_is_reported() {
        let mut c = config();
        c.start_position = [0.0, 0.0, 295.0];
        let mut sim = Simulation::new(c).unwrap();
        let frame = sim.tick(0.0);
        assert_eq!(frame.near_planet.as_deref(), Some("Azulon"));
    }

    #[test]
    fn brake_flag_follows_input() {
        let mut sim = Simulation::new(config()).unwrap();
        sim.controller_mut().process_keyboard(KeyCode::ShiftLeft, true);
        assert!(sim.tick(0.016).braking);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let c = SpaceConfig { stars_per_chunk: 0, ..SpaceConfig::default() };
        assert!(matches!(Simulation::new(c), Err(SpaceError::InvalidConfig(_))));
    }
}
