//! Unit tests for dr-drive.
//!
//! Every scenario runs on a small all-road `TileGrid` so throttle is 1.0 and
//! a unit with top speed 10 spends exactly one track sample per tick.

#[cfg(test)]
mod helpers {
    use dr_core::{Cell, Coord, Dir, FacingTracker, Fixed, HouseId, Locomotor, Mph, Target, UnitId, UnitRng};
    use dr_grid::{GridService, LandType, PathFinder, TileGrid};
    use dr_mission::{
        Building, BuildingKind, BuildingRegistry, Mission, MissionControl, Missionable, Positionable,
        Targetable,
    };

    use crate::{
        CellEvent, CellEventKind, CellEventListener, DriveConfig, DriveEffect, DriveEngine, DriveProfile,
        DriveState, DriveWorld, Drivable, Driver,
    };

    pub struct TestUnit {
        pub id:      UnitId,
        pub house:   HouseId,
        pub coord:   Coord,
        pub alive:   bool,
        pub control: MissionControl,
        pub profile: DriveProfile,
        pub drive:   DriveState,
        pub rng:     UnitRng,
        pub bias:    Fixed,
        pub convoy:  Option<Mph>,
        pub flag:    bool,
    }

    impl TestUnit {
        pub fn new(id: u32, cell: Cell, dir: Dir, profile: DriveProfile) -> Self {
            Self {
                id: UnitId(id),
                house: HouseId(0),
                coord: cell.center(),
                alive: true,
                control: MissionControl::default(),
                profile,
                drive: DriveState::new(FacingTracker::new(dir), DriveConfig::default().path_retry),
                rng: UnitRng::new(7, UnitId(id)),
                bias: Fixed::ONE,
                convoy: None,
                flag: false,
            }
        }
    }

    impl Positionable for TestUnit {
        fn id(&self) -> UnitId {
            self.id
        }
        fn house(&self) -> HouseId {
            self.house
        }
        fn coord(&self) -> Coord {
            self.coord
        }
        fn set_coord(&mut self, coord: Coord) {
            self.coord = coord;
        }
        fn is_alive(&self) -> bool {
            self.alive
        }
    }

    impl Targetable for TestUnit {
        fn tar_com(&self) -> Target {
            self.control.tar_com()
        }
        fn assign_target(&mut self, target: Target) {
            self.control.assign_target(target);
        }
    }

    impl Missionable for TestUnit {
        fn mission(&self) -> Mission {
            self.control.mission()
        }
        fn assign_mission(&mut self, mission: Mission) {
            self.control.assign_mission(mission);
        }
        fn override_mission(&mut self, mission: Mission, tar_com: Target) {
            self.control.override_mission(mission, tar_com);
        }
        fn restore_mission(&mut self) {
            self.control.restore_mission();
        }
    }

    impl Drivable for TestUnit {
        fn profile(&self) -> &DriveProfile {
            &self.profile
        }
        fn drive(&self) -> &DriveState {
            &self.drive
        }
        fn drive_mut(&mut self) -> &mut DriveState {
            &mut self.drive
        }
        fn rng(&mut self) -> &mut UnitRng {
            &mut self.rng
        }
        fn destroy(&mut self) {
            self.alive = false;
        }
        fn speed_bias(&self) -> Fixed {
            self.bias
        }
        fn formation_speed(&self) -> Option<Mph> {
            self.convoy
        }
        fn is_carrying_flag(&self) -> bool {
            self.flag
        }
    }

    pub fn tank() -> DriveProfile {
        DriveProfile {
            locomotor: Locomotor::Track,
            max_speed: Mph::SLOW_ISH,
            rot:       5,
            crusher:   true,
            harvester: false,
        }
    }

    pub fn jeep() -> DriveProfile {
        DriveProfile { locomotor: Locomotor::Wheel, crusher: false, ..tank() }
    }

    pub fn harvester() -> DriveProfile {
        DriveProfile { harvester: true, crusher: false, ..tank() }
    }

    /// Records every cell event; destroys whatever finishes a track on `mine`.
    #[derive(Default)]
    pub struct Recorder {
        pub events: Vec<CellEvent>,
        pub mine:   Option<Cell>,
    }

    impl CellEventListener for Recorder {
        fn on_cell_event(&mut self, unit: &mut dyn Drivable, event: CellEvent, grid: &mut dyn GridService) {
            self.events.push(event);
            if event.kind == CellEventKind::End && self.mine == Some(event.cell) {
                unit.destroy();
                grid.remove(event.cell, unit.id());
                grid.release_all(unit.id());
            }
        }
    }

    pub const REFINERY: dr_core::BuildingId = dr_core::BuildingId(0);
    pub const REPAIR:   dr_core::BuildingId = dr_core::BuildingId(1);

    pub struct Harness {
        pub grid:     TileGrid,
        pub radio:    BuildingRegistry,
        pub listener: Recorder,
        pub effects:  Vec<DriveEffect>,
    }

    impl Harness {
        pub fn road(width: i32, height: i32) -> Self {
            let mut radio = BuildingRegistry::new();
            radio
                .add(Building::new(REFINERY, BuildingKind::Refinery, HouseId(0), Cell::new(4, 4)))
                .unwrap();
            radio
                .add(Building::new(REPAIR, BuildingKind::RepairBay, HouseId(0), Cell::new(8, 2)))
                .unwrap();
            Self {
                grid: TileGrid::filled(width, height, LandType::Road),
                radio,
                listener: Recorder::default(),
                effects: Vec::new(),
            }
        }

        pub fn with<P: PathFinder, R>(
            &mut self,
            engine: &DriveEngine<P>,
            unit: &mut TestUnit,
            f: impl FnOnce(&mut Driver<'_, '_, P>) -> R,
        ) -> R {
            let mut world = DriveWorld {
                grid:     &mut self.grid,
                radio:    &mut self.radio,
                listener: &mut self.listener,
                effects:  &mut self.effects,
            };
            let mut driver = engine.driver(unit, &mut world);
            f(&mut driver)
        }

        /// Put `unit` on the map at its current cell.
        pub fn place<P: PathFinder>(&mut self, engine: &DriveEngine<P>, unit: &mut TestUnit) {
            let cell = unit.coord.cell();
            self.with(engine, unit, |d| d.unlimbo(cell));
        }

        pub fn run<P: PathFinder>(&mut self, engine: &DriveEngine<P>, unit: &mut TestUnit, ticks: usize) {
            for _ in 0..ticks {
                self.with(engine, unit, |d| d.ai());
            }
        }

        pub fn events(&self, kind: CellEventKind) -> Vec<Cell> {
            self.listener.events.iter().filter(|e| e.kind == kind).map(|e| e.cell).collect()
        }
    }
}

// ── Basics ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod basics {
    use dr_core::{Dir, Facing, FacingTracker, Fixed};
    use crate::{DriveConfig, DriveEngine, DriveState, DriveStatus, PathBuffer};
    use dr_grid::DijkstraPathFinder;

    #[test]
    fn path_buffer_shift_and_truncate() {
        let mut p = PathBuffer::from_steps(&[Facing::N, Facing::E, Facing::S, Facing::W]);
        assert_eq!(p.len(), 4);
        p.shift(1);
        assert_eq!(p.to_vec(), vec![Facing::E, Facing::S, Facing::W]);
        p.truncate(2);
        assert_eq!(p.to_vec(), vec![Facing::E, Facing::S]);
        p.shift(2);
        assert!(p.is_empty());
        assert_eq!(p.get(0), None);
    }

    #[test]
    fn path_buffer_keeps_only_capacity() {
        let long = [Facing::N; 20];
        let p = PathBuffer::from_steps(&long);
        assert_eq!(p.len(), PathBuffer::CAPACITY);
        assert_eq!(format!("{p:?}").matches("N").count(), PathBuffer::CAPACITY);
    }

    #[test]
    fn status_priority() {
        let mut st = DriveState::new(FacingTracker::new(Dir::N), 10);
        assert_eq!(st.status(), DriveStatus::Idle);
        assert!(st.is_idle());
        st.blocked = true;
        assert_eq!(st.status(), DriveStatus::Blocked);
        st.facing.set_desired(Dir::E);
        assert_eq!(st.status(), DriveStatus::Rotating);
        st.track = Some(dr_track::TransitionId(0));
        assert_eq!(st.status(), DriveStatus::OnTrack);
        assert!(!st.is_idle());
    }

    #[test]
    fn config_validation() {
        assert!(DriveConfig::default().validate().is_ok());
        let bad = DriveConfig { path_retry: 0, path_delay_ticks: 0, ..Default::default() };
        assert!(DriveEngine::new(DijkstraPathFinder::default(), bad).is_err());
        let bad = DriveConfig { groundspeed_bias: Fixed::ZERO, ..Default::default() };
        assert!(bad.validate().is_err());
        let bad = DriveConfig { nearby_radius: 0, ..Default::default() };
        assert!(bad.validate().is_err());
    }
}

// ── Track following ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tracks {
    use dr_core::{Cell, Dir, Facing, Fixed};
    use dr_grid::GridService;
    use dr_track::TransitionId;
    use super::helpers::{Harness, TestUnit, jeep, tank};
    use crate::{CellEventKind, DriveEngine, DriveStatus};

    #[test]
    fn straight_track_takes_24_ticks() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N]));

        h.run(&engine, &mut u, 23);
        assert_eq!(u.drive.status(), DriveStatus::OnTrack);
        assert_eq!(u.coord, Cell::new(5, 7).center().offset(0, 3));
        assert_eq!(h.grid.reservation(Cell::new(5, 7)), Some(u.id));

        h.run(&engine, &mut u, 1);
        assert_eq!(u.coord, Cell::new(5, 7).center());
        assert_eq!(u.drive.track, None);
        assert_eq!(u.drive.facing.current(), Dir::N);
        assert_eq!(u.drive.accumulator, 0);
        assert_eq!(h.grid.reservation(Cell::new(5, 7)), None);
        assert_eq!(h.grid.locate(u.id), Some(Cell::new(5, 7)));
        assert_eq!(h.events(CellEventKind::End), vec![Cell::new(5, 7)]);
    }

    #[test]
    fn render_offset_interpolates_toward_next_sample() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N]));
        h.run(&engine, &mut u, 3);
        // Whole steps only: nothing left over to interpolate.
        assert_eq!(u.drive.render_offset, (0, 0));
        let rc = h.with(&engine, &mut u, |d| d.render_coord());
        assert_eq!(rc, u.coord);
    }

    #[test]
    fn double_turn_releases_midpoint_on_reaching_it() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N, Facing::E]));

        h.run(&engine, &mut u, 1);
        assert_eq!(u.drive.track, Some(TransitionId::between(Facing::N, Facing::E)));
        assert_eq!(u.drive.head_to, Some(Cell::new(6, 7)));
        assert!(u.drive.path.is_empty());
        assert_eq!(h.grid.reservation(Cell::new(6, 7)), Some(u.id));
        assert_eq!(h.grid.reservation(Cell::new(5, 7)), Some(u.id));

        h.run(&engine, &mut u, 18);
        assert_eq!(h.grid.reservation(Cell::new(5, 7)), Some(u.id));
        h.run(&engine, &mut u, 1);
        assert_eq!(h.grid.reservation(Cell::new(5, 7)), None);
        assert_eq!(h.events(CellEventKind::During), vec![Cell::new(5, 7)]);

        h.run(&engine, &mut u, 18);
        assert_eq!(u.drive.status(), DriveStatus::OnTrack);
        h.run(&engine, &mut u, 1);
        assert_eq!(u.coord, Cell::new(6, 7).center());
        assert_eq!(u.drive.facing.current(), Dir::E);
        assert_eq!(h.grid.reserved_count(), 0);
    }

    #[test]
    fn wheeled_unit_turns_on_a_short_track() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, jeep());
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::E]));

        h.run(&engine, &mut u, 1);
        assert!(u.drive.on_short_track);
        assert!(!u.drive.facing.is_rotating());
        assert_eq!(u.drive.head_to, Some(Cell::new(5, 8)));
        assert_eq!(u.drive.path.first(), Some(Facing::E));

        h.run(&engine, &mut u, 30);
        assert_eq!(u.coord.cell(), Cell::new(5, 8));
        assert_eq!(u.drive.facing.current(), Dir::E);
        assert!(!u.drive.on_short_track);
        assert_eq!(u.drive.track, Some(TransitionId::between(Facing::E, Facing::E)));

        h.run(&engine, &mut u, 24);
        assert_eq!(u.coord, Cell::new(6, 8).center());
    }

    #[test]
    fn tracked_unit_rotates_in_place() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 5), Dir::N, tank());
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::S]));

        h.run(&engine, &mut u, 1);
        assert_eq!(u.drive.status(), DriveStatus::Rotating);
        assert_eq!(u.coord, Cell::new(5, 5).center());

        h.run(&engine, &mut u, 25);
        assert!(u.drive.facing.is_rotating());
        h.run(&engine, &mut u, 1);
        assert_eq!(u.drive.facing.current(), Dir::S);
        assert_eq!(h.events(CellEventKind::Rotation), vec![Cell::new(5, 5)]);

        h.run(&engine, &mut u, 24);
        assert_eq!(u.coord, Cell::new(5, 6).center());
    }

    #[test]
    fn zero_speed_parks_mid_track_and_resumes() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N]));
        h.run(&engine, &mut u, 5);
        assert_eq!(u.drive.track_index, 5);
        let parked = u.coord;

        u.bias = Fixed::ZERO;
        h.run(&engine, &mut u, 20);
        assert_eq!(u.drive.status(), DriveStatus::OnTrack);
        assert_eq!(u.drive.track_index, 5);
        assert_eq!(u.coord, parked);
        assert_eq!(u.drive.accumulator, 0);
        assert_eq!(h.grid.reservation(Cell::new(5, 7)), Some(u.id));

        u.bias = Fixed::ONE;
        h.run(&engine, &mut u, 18);
        assert_eq!(u.drive.status(), DriveStatus::OnTrack);
        h.run(&engine, &mut u, 1);
        assert_eq!(u.coord, Cell::new(5, 7).center());
        assert_eq!(h.events(CellEventKind::End), vec![Cell::new(5, 7)]);
    }
}

// ── Speed modifiers ───────────────────────────────────────────────────────────

#[cfg(test)]
mod speed {
    use dr_core::{Cell, Dir, Fixed, Mph};
    use super::helpers::{Harness, TestUnit, tank};
    use crate::{DriveConfig, DriveEngine};
    use dr_grid::DijkstraPathFinder;

    fn top_speed(engine: &DriveEngine, u: &mut TestUnit) -> i32 {
        let mut h = Harness::road(12, 12);
        h.with(engine, u, |d| d.max_speed())
    }

    #[test]
    fn flag_carrier_drives_at_half_speed() {
        let engine = DriveEngine::standard();
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        assert_eq!(top_speed(&engine, &mut u), 10);
        u.flag = true;
        assert_eq!(top_speed(&engine, &mut u), 5);
    }

    #[test]
    fn formation_speed_replaces_own_speed() {
        let engine = DriveEngine::standard();
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        u.convoy = Some(Mph(20));
        assert_eq!(top_speed(&engine, &mut u), 20);
        u.convoy = Some(Mph(4));
        assert_eq!(top_speed(&engine, &mut u), 4);
        u.convoy = Some(Mph(20));
        u.flag = true;
        assert_eq!(top_speed(&engine, &mut u), 10);
    }

    #[test]
    fn biases_multiply_and_cap_at_255() {
        let config = DriveConfig { groundspeed_bias: Fixed(512), ..Default::default() };
        let engine = DriveEngine::new(DijkstraPathFinder::default(), config).unwrap();
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        assert_eq!(top_speed(&engine, &mut u), 20);
        u.bias = Fixed::HALF;
        assert_eq!(top_speed(&engine, &mut u), 10);
        u.bias = Fixed::ONE;
        u.convoy = Some(Mph(200));
        assert_eq!(top_speed(&engine, &mut u), 255);
    }
}

// ── Mid-track jumps ───────────────────────────────────────────────────────────

#[cfg(test)]
mod jumps {
    use dr_core::{Cell, Dir, Facing, HouseId, UnitId};
    use dr_grid::{GridService, Occupant, OccupantKind};
    use dr_track::TransitionId;
    use super::helpers::{Harness, TestUnit, tank};
    use crate::{DriveEffect, DriveEngine, DriveStatus};

    fn blocker() -> Occupant {
        Occupant {
            unit:      UnitId(99),
            house:     HouseId(0),
            kind:      OccupantKind::Vehicle,
            cloaked:   false,
            crushable: false,
        }
    }

    fn setup() -> (DriveEngine, Harness, TestUnit) {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N, Facing::E, Facing::S]));
        (engine, h, u)
    }

    #[test]
    fn jumps_straight_onto_the_next_turn() {
        let (engine, mut h, mut u) = setup();
        h.run(&engine, &mut u, 27);
        assert_eq!(u.drive.track, Some(TransitionId::between(Facing::E, Facing::S)));
        assert_eq!(u.drive.track_index, 11);
        assert_eq!(u.drive.head_to, Some(Cell::new(6, 8)));
        assert!(u.drive.path.is_empty());
        assert_eq!(h.grid.holdings(u.id), &[Cell::new(6, 8), Cell::new(6, 7)][..]);
        assert_eq!(h.grid.reservation(Cell::new(5, 7)), None);

        h.run(&engine, &mut u, 40);
        assert_eq!(u.coord, Cell::new(6, 8).center());
        assert_eq!(u.drive.facing.current(), Dir::S);
        assert_eq!(h.grid.reserved_count(), 0);
    }

    #[test]
    fn jump_waits_for_a_blocker_that_clears() {
        let (engine, mut h, mut u) = setup();
        h.grid.place(Cell::new(6, 8), blocker());

        h.run(&engine, &mut u, 28);
        assert_eq!(u.drive.jump_wait, 2);
        assert_eq!(u.drive.track_index, 26);
        assert_eq!(
            h.effects,
            vec![DriveEffect::Scatter {
                unit:      UnitId(99),
                threat:    Some(u.coord),
                forced:    true,
                nokidding: true,
            }]
        );

        h.grid.remove(Cell::new(6, 8), UnitId(99));
        h.run(&engine, &mut u, 1);
        assert_eq!(u.drive.track, Some(TransitionId::between(Facing::E, Facing::S)));
        assert_eq!(u.drive.jump_wait, 0);

        h.run(&engine, &mut u, 40);
        assert_eq!(u.coord, Cell::new(6, 8).center());
    }

    #[test]
    fn jump_skipped_when_blocker_stays() {
        let (engine, mut h, mut u) = setup();
        h.grid.place(Cell::new(6, 8), blocker());

        h.run(&engine, &mut u, 46);
        assert_eq!(u.drive.status(), DriveStatus::OnTrack);
        h.run(&engine, &mut u, 1);
        assert_eq!(u.coord, Cell::new(6, 7).center());
        assert_eq!(u.drive.path.first(), Some(Facing::S));
        assert_eq!(u.drive.status(), DriveStatus::Rotating);
        assert_eq!(h.effects.len(), 1);
    }

    #[test]
    fn cloaked_enemy_at_the_jump_cell_is_revealed_and_passed() {
        let (engine, mut h, mut u) = setup();
        h.grid.place(Cell::new(6, 8), Occupant { house: HouseId(1), cloaked: true, ..blocker() });

        h.run(&engine, &mut u, 27);
        assert_eq!(u.drive.track, Some(TransitionId::between(Facing::N, Facing::E)));
        assert_eq!(u.drive.track_index, 27);
        assert_eq!(u.drive.jump_wait, 0);
        assert_eq!(h.effects, vec![DriveEffect::Shimmer { cell: Cell::new(6, 8) }]);

        h.run(&engine, &mut u, 11);
        assert_eq!(u.drive.status(), DriveStatus::OnTrack);
        h.run(&engine, &mut u, 1);
        assert_eq!(u.coord, Cell::new(6, 7).center());
        assert_eq!(u.drive.path.first(), Some(Facing::S));
    }

    #[test]
    fn jump_skipped_when_landing_cell_is_held() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N, Facing::W, Facing::S]));

        // The W-S turn starts back in the old midpoint; someone else takes it.
        h.run(&engine, &mut u, 20);
        assert_eq!(h.grid.reservation(Cell::new(5, 7)), None);
        assert!(h.grid.set_occupancy(Cell::new(5, 7), UnitId(99), true));

        h.run(&engine, &mut u, 7);
        assert_eq!(u.drive.track, Some(TransitionId::between(Facing::N, Facing::W)));
        assert_eq!(u.drive.track_index, 27);
        assert_eq!(h.grid.holdings(u.id), &[Cell::new(4, 7)][..]);

        h.run(&engine, &mut u, 12);
        assert_eq!(u.coord, Cell::new(4, 7).center());
        assert_eq!(u.drive.path.first(), Some(Facing::S));
        assert_eq!(h.grid.reservation(Cell::new(5, 7)), Some(UnitId(99)));
    }
}

// ── Blocking and reservations ─────────────────────────────────────────────────

#[cfg(test)]
mod blocking {
    use dr_core::{Cell, Dir, Facing, HouseId, Target, UnitId};
    use dr_grid::{GridService, LandType, Occupant, OccupantKind, Overlay};
    use dr_mission::Mission;
    use super::helpers::{Harness, TestUnit, tank};
    use crate::{DriveEffect, DriveEngine, DriveStatus};

    #[test]
    fn reserved_cell_blocks_second_unit() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut a = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        let mut b = TestUnit::new(2, Cell::new(5, 6), Dir::S, tank());
        h.place(&engine, &mut a);
        h.place(&engine, &mut b);
        h.with(&engine, &mut a, |d| d.queue_path(&[Facing::N]));
        h.with(&engine, &mut b, |d| d.queue_path(&[Facing::S]));

        h.run(&engine, &mut a, 1);
        h.run(&engine, &mut b, 1);
        assert_eq!(h.grid.reservation(Cell::new(5, 7)), Some(a.id));
        assert_eq!(b.drive.status(), DriveStatus::Blocked);
        assert_eq!(b.drive.path.first(), Some(Facing::S));
        assert_eq!(b.coord, Cell::new(5, 6).center());
    }

    #[test]
    fn enemy_in_the_way_becomes_the_target() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut enemy = TestUnit::new(2, Cell::new(5, 7), Dir::S, tank());
        enemy.house = HouseId(1);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        h.place(&engine, &mut enemy);
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N]));

        h.run(&engine, &mut u, 1);
        assert_eq!(u.control.mission, Mission::Attack);
        assert_eq!(u.control.tar_com, Target::Unit(enemy.id));
        assert!(u.drive.path.is_empty());
        assert_eq!(u.drive.status(), DriveStatus::Blocked);
    }

    #[test]
    fn wall_overlay_is_attacked() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        h.grid.set_overlay(Cell::new(5, 7), Overlay::Wall);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N]));

        h.run(&engine, &mut u, 1);
        assert_eq!(u.control.tar_com, Target::Cell(Cell::new(5, 7)));
        assert_eq!(h.grid.reserved_count(), 0);
    }

    /// A 12x12 map that is rock everywhere except column 5.
    fn corridor() -> Harness {
        let mut h = Harness::road(12, 12);
        for y in 0..12 {
            for x in (0..12).filter(|&x| x != 5) {
                h.grid.set_land(Cell::new(x, y), LandType::Rock).unwrap();
            }
        }
        h
    }

    #[test]
    fn parked_ally_in_a_corridor_exhausts_the_budget() {
        let engine = DriveEngine::standard();
        let retries = engine.config().path_retry as usize;
        let mut h = corridor();
        h.grid.place(
            Cell::new(5, 7),
            Occupant {
                unit:      UnitId(99),
                house:     HouseId(0),
                kind:      OccupantKind::Vehicle,
                cloaked:   false,
                crushable: false,
            },
        );
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        u.control.mission = Mission::Move;
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.assign_destination(Target::Cell(Cell::new(5, 2))));
        assert_eq!(u.drive.retry_budget, 9);
        assert_eq!(u.drive.status(), DriveStatus::Blocked);

        h.run(&engine, &mut u, 400);
        assert_eq!(u.drive.nav_com, Target::None);
        assert_eq!(u.control.mission, Mission::Guard);
        assert_eq!(u.drive.status(), DriveStatus::Idle);
        assert!(u.drive.path.is_empty());
        assert_eq!(u.coord, Cell::new(5, 8).center());
        assert!(h.effects.len() <= 2 * retries, "{} scatter requests", h.effects.len());
        assert!(h.effects.iter().all(|e| matches!(e, DriveEffect::Scatter { unit: UnitId(99), .. })));
    }

    #[test]
    fn reservation_that_never_clears_exhausts_the_budget() {
        let engine = DriveEngine::standard();
        let mut h = corridor();
        assert!(h.grid.set_occupancy(Cell::new(5, 7), UnitId(99), true));
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        u.control.mission = Mission::Move;
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.assign_destination(Target::Cell(Cell::new(5, 2))));
        assert_eq!(u.drive.path.first(), Some(Facing::N));
        assert_eq!(u.drive.retry_budget, 10);

        // Charged once per path delay, not once per tick.
        h.run(&engine, &mut u, 20);
        assert_eq!(u.drive.retry_budget, 9);
        assert_eq!(u.drive.status(), DriveStatus::Blocked);
        assert_eq!(u.drive.nav_com, Target::Cell(Cell::new(5, 2)));

        h.run(&engine, &mut u, 140);
        assert_eq!(u.drive.nav_com, Target::None);
        assert_eq!(u.drive.status(), DriveStatus::Idle);
        assert_eq!(u.coord, Cell::new(5, 8).center());
    }

    #[test]
    fn committing_a_track_refills_the_budget() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        u.control.mission = Mission::Move;
        h.place(&engine, &mut u);
        u.drive.retry_budget = 2;
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N, Facing::N]));
        h.run(&engine, &mut u, 1);
        assert!(u.drive.track.is_some());
        assert_eq!(u.drive.retry_budget, 10);
    }
}

// ── Destinations ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod destinations {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use dr_core::{Cell, Dir, Facing, Target, UnitId};
    use dr_grid::{
        DijkstraPathFinder, GridError, GridResult, GridService, LandType, MoveType, Mover, PathFinder,
    };
    use dr_mission::{Mission, Radio, RadioMessage};
    use dr_track::TransitionId;
    use super::helpers::{Harness, REFINERY, REPAIR, TestUnit, harvester, jeep, tank};
    use crate::{DriveConfig, DriveEngine, DriveStatus};

    #[derive(Default)]
    struct FailingFinder {
        calls: AtomicUsize,
    }

    impl PathFinder for FailingFinder {
        fn find_path(
            &self,
            _grid: &dyn GridService,
            _mover: &Mover,
            from: Cell,
            to: Cell,
            _threshold: MoveType,
        ) -> GridResult<Vec<Facing>> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Err(GridError::NoPath { from, to })
        }
    }

    #[test]
    fn drives_to_a_cell() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        u.control.mission = Mission::Move;
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.assign_destination(Target::Cell(Cell::new(5, 4))));
        assert_eq!(u.drive.path.len(), 3);
        assert!(u.drive.track.is_some());

        h.run(&engine, &mut u, 150);
        assert_eq!(u.coord, Cell::new(5, 4).center());
        assert!(u.drive.is_idle());
        assert_eq!(h.grid.reserved_count(), 0);
    }

    #[test]
    fn reassigning_the_same_destination_changes_nothing() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.assign_destination(Target::Cell(Cell::new(5, 2))));
        h.run(&engine, &mut u, 5);

        let before = u.drive.clone();
        h.with(&engine, &mut u, |d| d.assign_destination(Target::Cell(Cell::new(5, 2))));
        assert_eq!(u.drive, before);
    }

    #[test]
    fn retry_budget_abandons_after_three_failures() {
        let config = DriveConfig { path_retry: 3, path_delay_ticks: 0, ..Default::default() };
        let engine = DriveEngine::new(FailingFinder::default(), config).unwrap();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        u.control.mission = Mission::Move;
        h.place(&engine, &mut u);

        h.with(&engine, &mut u, |d| d.assign_destination(Target::Cell(Cell::new(5, 1))));
        assert_eq!(u.drive.retry_budget, 2);
        assert_eq!(u.drive.threshold, MoveType::Temp);
        assert_eq!(u.drive.status(), DriveStatus::Blocked);

        h.run(&engine, &mut u, 1);
        assert_eq!(u.drive.nav_com, Target::Cell(Cell::new(5, 1)));
        h.run(&engine, &mut u, 1);
        assert_eq!(u.drive.nav_com, Target::None);
        assert_eq!(u.control.mission, Mission::Guard);
        assert_eq!(engine.finder().calls.load(Ordering::Relaxed), 6);
        assert_eq!(u.drive.status(), DriveStatus::Idle);
    }

    #[test]
    fn harvester_negotiates_refinery_docking() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(4, 5), Dir::N, harvester());
        h.place(&engine, &mut u);

        h.with(&engine, &mut u, |d| d.assign_destination(Target::Building(REFINERY)));
        assert_eq!(u.control.mission, Mission::Enter);
        assert_eq!(u.drive.nav_com, Target::None);
        assert_eq!(h.radio.contact_of(u.id), Some(REFINERY));

        // Drive onto the dock cell.
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N]));
        h.run(&engine, &mut u, 24);
        assert_eq!(u.coord, Cell::new(4, 4).center());
        assert!(h.radio.get(REFINERY).unwrap().is_docked());
    }

    #[test]
    fn repair_bay_is_reserved_before_driving() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(8, 5), Dir::N, tank());
        h.place(&engine, &mut u);

        h.with(&engine, &mut u, |d| d.assign_destination(Target::Building(REPAIR)));
        assert_eq!(u.drive.nav_com, Target::Building(REPAIR));
        assert_eq!(h.radio.get(REPAIR).unwrap().contact(), Some(u.id));
        assert!(u.drive.track.is_none());

        h.run(&engine, &mut u, 100);
        assert_eq!(u.coord, Cell::new(8, 2).center());
    }

    #[test]
    fn busy_repair_bay_is_not_a_destination() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        assert_eq!(h.radio.transmit(UnitId(50), RadioMessage::Hello, REPAIR), RadioMessage::Roger);
        let mut u = TestUnit::new(1, Cell::new(8, 5), Dir::N, tank());
        u.control.mission = Mission::Move;
        h.place(&engine, &mut u);

        h.with(&engine, &mut u, |d| d.assign_destination(Target::Building(REPAIR)));
        assert_eq!(u.drive.nav_com, Target::None);
        assert_eq!(h.radio.get(REPAIR).unwrap().contact(), Some(UnitId(50)));
        assert_eq!(h.radio.contact_of(u.id), None);

        h.run(&engine, &mut u, 100);
        assert_eq!(u.coord, Cell::new(8, 5).center());
        assert!(u.drive.is_idle());
    }

    #[test]
    fn wheeled_path_opens_with_an_arc() {
        let config = DriveConfig { fixup_paths: true, ..Default::default() };
        let engine = DriveEngine::new(DijkstraPathFinder::default(), config).unwrap();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 5), Dir::N, jeep());
        h.place(&engine, &mut u);

        h.with(&engine, &mut u, |d| d.assign_destination(Target::Cell(Cell::new(5, 9))));
        assert_eq!(u.drive.track, Some(TransitionId::between(Facing::N, Facing::W)));
        assert_eq!(u.drive.head_to, Some(Cell::new(4, 4)));
        assert_eq!(u.drive.path.to_vec(), vec![Facing::S, Facing::SE, Facing::S, Facing::S, Facing::S]);
    }

    #[test]
    fn reversing_arc_tries_the_other_side_when_blocked() {
        let config = DriveConfig { fixup_paths: true, ..Default::default() };
        let engine = DriveEngine::new(DijkstraPathFinder::default(), config).unwrap();
        let mut h = Harness::road(12, 12);
        // The west-side arc swings through (4, 4).
        h.grid.set_land(Cell::new(4, 4), LandType::Rock).unwrap();
        let mut u = TestUnit::new(1, Cell::new(5, 5), Dir::N, jeep());
        h.place(&engine, &mut u);

        h.with(&engine, &mut u, |d| d.assign_destination(Target::Cell(Cell::new(5, 9))));
        assert_eq!(u.drive.track, Some(TransitionId::between(Facing::N, Facing::E)));
        assert_eq!(u.drive.head_to, Some(Cell::new(6, 4)));
        assert_eq!(u.drive.path.to_vec(), vec![Facing::S, Facing::SW, Facing::S, Facing::S, Facing::S]);
    }

    #[test]
    fn arc_fixup_is_off_by_default() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 5), Dir::N, jeep());
        h.place(&engine, &mut u);

        h.with(&engine, &mut u, |d| d.assign_destination(Target::Cell(Cell::new(5, 9))));
        assert_eq!(u.drive.path.to_vec(), vec![Facing::S; 4]);
        assert!(u.drive.on_short_track);
    }

    #[test]
    fn arc_fixup_leaves_tracked_units_alone() {
        let config = DriveConfig { fixup_paths: true, ..Default::default() };
        let engine = DriveEngine::new(DijkstraPathFinder::default(), config).unwrap();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 5), Dir::N, tank());
        h.place(&engine, &mut u);

        h.with(&engine, &mut u, |d| d.assign_destination(Target::Cell(Cell::new(5, 9))));
        assert_eq!(u.drive.path.to_vec(), vec![Facing::S; 4]);
        assert_eq!(u.drive.status(), DriveStatus::Rotating);
    }
}

// ── Cell processing ───────────────────────────────────────────────────────────

#[cfg(test)]
mod cells {
    use dr_core::{Cell, Dir, Facing, HouseId, Target, UnitId};
    use dr_grid::{DijkstraPathFinder, GridService, LandType, Occupant, OccupantKind, Overlay};
    use dr_mission::Mission;
    use super::helpers::{Harness, TestUnit, jeep, tank};
    use crate::{CellEventKind, DriveConfig, DriveEffect, DriveEngine};

    #[test]
    fn crusher_flattens_enemy_infantry() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        h.grid.place(
            Cell::new(5, 7),
            Occupant {
                unit:      UnitId(50),
                house:     HouseId(1),
                kind:      OccupantKind::Infantry,
                cloaked:   false,
                crushable: true,
            },
        );
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N]));

        h.run(&engine, &mut u, 1);
        assert!(matches!(h.effects[0], DriveEffect::Scatter { unit: UnitId(50), forced: true, .. }));

        h.run(&engine, &mut u, 23);
        assert!(h.effects.contains(&DriveEffect::Crush { victim: UnitId(50), by: u.id }));
        assert_eq!(h.grid.overlay(Cell::new(5, 7)), Overlay::Squish);
        let here: Vec<UnitId> = h.grid.occupants(Cell::new(5, 7)).iter().map(|o| o.unit).collect();
        assert_eq!(here, vec![u.id]);
    }

    #[test]
    fn mine_destroys_unit_mid_move() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        h.listener.mine = Some(Cell::new(5, 7));
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N, Facing::N]));

        h.run(&engine, &mut u, 24);
        assert!(!u.alive);
        let at = u.coord;
        h.run(&engine, &mut u, 10);
        assert_eq!(u.coord, at);
        assert_eq!(h.grid.locate(u.id), None);
        assert_eq!(h.listener.events.len(), 1);
    }

    #[test]
    fn scatter_moves_away_from_threat() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::E, jeep());
        h.place(&engine, &mut u);

        let threat = Cell::new(5, 9).center();
        h.with(&engine, &mut u, |d| d.scatter(Some(threat), true, false));
        let refuge = [Cell::new(4, 7), Cell::new(5, 7), Cell::new(6, 7)];
        let Target::Cell(dest) = u.drive.nav_com else { panic!("no refuge chosen") };
        assert!(refuge.contains(&dest), "{dest}");
        assert!(u.drive.is_scattering);
    }

    #[test]
    fn sleeping_units_do_not_scatter() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::E, jeep());
        u.control.mission = Mission::Sleep;
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.scatter(None, true, true));
        assert_eq!(u.drive.nav_com, Target::None);
    }

    #[test]
    fn teleport_lands_on_nearest_open_cell() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        h.grid.set_land(Cell::new(2, 2), LandType::Rock).unwrap();
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        u.control.mission = Mission::Move;
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.assign_destination(Target::Cell(Cell::new(5, 2))));

        assert!(h.with(&engine, &mut u, |d| d.teleport_to(Cell::new(2, 2))));
        let cell = u.coord.cell();
        assert_ne!(cell, Cell::new(2, 2));
        assert_eq!(cell.cell_distance(Cell::new(2, 2)), 1);
        assert_eq!(u.control.mission, Mission::None);
        assert_eq!(u.drive.nav_com, Target::None);
        assert_eq!(h.grid.locate(u.id), Some(cell));
        assert_eq!(h.grid.reserved_count(), 0);
        assert_eq!(h.events(CellEventKind::End), vec![cell]);
    }

    #[test]
    fn timed_teleport_returns_home() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        h.place(&engine, &mut u);

        h.with(&engine, &mut u, |d| d.teleport_with_return(Cell::new(2, 2), 5));
        assert_eq!(u.coord, Cell::new(2, 2).center());
        h.run(&engine, &mut u, 4);
        assert_eq!(u.coord, Cell::new(2, 2).center());
        h.run(&engine, &mut u, 1);
        assert_eq!(u.coord, Cell::new(5, 8).center());
        assert!(u.drive.teleport_return.is_none());
    }

    #[test]
    fn teleport_into_solid_rock_is_refused() {
        let config = DriveConfig { nearby_radius: 1, ..Default::default() };
        let engine = DriveEngine::new(DijkstraPathFinder::default(), config).unwrap();
        let mut h = Harness::road(12, 12);
        for y in 1..=3 {
            for x in 1..=3 {
                h.grid.set_land(Cell::new(x, y), LandType::Rock).unwrap();
            }
        }
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        u.control.mission = Mission::Move;
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.assign_destination(Target::Cell(Cell::new(5, 2))));
        let before = u.drive.clone();

        assert!(!h.with(&engine, &mut u, |d| d.teleport_to(Cell::new(2, 2))));
        assert_eq!(u.coord, Cell::new(5, 8).center());
        assert_eq!(u.drive, before);
        assert_eq!(u.control.mission, Mission::Move);
        assert_eq!(h.grid.locate(u.id), Some(Cell::new(5, 8)));
        assert!(h.events(CellEventKind::End).is_empty());

        assert!(!h.with(&engine, &mut u, |d| d.teleport_with_return(Cell::new(2, 2), 5)));
        assert!(u.drive.teleport_return.is_none());
    }

    #[test]
    fn limbo_clears_presence_and_reservations() {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut u = TestUnit::new(1, Cell::new(5, 8), Dir::N, tank());
        h.place(&engine, &mut u);
        h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N]));
        h.run(&engine, &mut u, 3);
        assert!(h.grid.reserved_count() > 0);

        h.with(&engine, &mut u, |d| d.limbo());
        assert_eq!(h.grid.reserved_count(), 0);
        assert_eq!(h.grid.locate(u.id), None);
        assert!(u.drive.track.is_none());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod props {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use dr_core::{Cell, Dir, Facing, Fixed, Mph, Target, UnitId};
    use dr_grid::{DijkstraPathFinder, GridService};
    use dr_track::TrackTable;
    use super::helpers::{Harness, TestUnit, jeep, tank};
    use crate::{DriveConfig, DriveEngine, DriveProfile, PathBuffer, STEP};

    proptest! {
        #[test]
        fn accumulator_stays_below_one_step(speed in 1u8..=80, bias in 64u16..=512, ticks in 1usize..150) {
            let config = DriveConfig { groundspeed_bias: Fixed(bias), ..Default::default() };
            let engine = DriveEngine::new(DijkstraPathFinder::default(), config).unwrap();
            let table = TrackTable::standard();
            let mut h = Harness::road(4, 40);
            let profile = DriveProfile { max_speed: Mph(speed), ..tank() };
            let mut u = TestUnit::new(1, Cell::new(1, 38), Dir::N, profile);
            h.place(&engine, &mut u);
            h.with(&engine, &mut u, |d| d.queue_path(&[Facing::N; 9]));

            for _ in 0..ticks {
                h.run(&engine, &mut u, 1);
                prop_assert!((0..STEP).contains(&u.drive.accumulator));
                if let Some(track) = u.drive.track {
                    let raw = table.track_for(track, u.drive.on_short_track).unwrap();
                    prop_assert!(u.drive.track_index < raw.len());
                }
                prop_assert!(h.grid.reserved_count() <= 2);
            }
        }

        #[test]
        fn path_buffer_only_shrinks_from_the_front(
            steps in proptest::collection::vec(0u8..8, 0..16),
            shifts in proptest::collection::vec(0usize..4, 1..8),
        ) {
            let steps: Vec<Facing> = steps.into_iter().map(Facing::from_index).collect();
            let mut buf = PathBuffer::from_steps(&steps);
            let mut consumed = 0;
            for n in shifts {
                let before = buf.len();
                buf.shift(n);
                consumed = (consumed + n).min(steps.len());
                prop_assert!(buf.len() <= before);
                let expected: Vec<Facing> =
                    steps.iter().copied().skip(consumed).take(PathBuffer::CAPACITY - consumed.min(PathBuffer::CAPACITY)).collect();
                prop_assert_eq!(buf.to_vec(), expected);
            }
        }
    }

    /// Describes the first reservation conflict among `units`, if any.
    fn reservation_conflict(h: &Harness, units: &[TestUnit]) -> Option<String> {
        let mut holder: HashMap<Cell, UnitId> = HashMap::new();
        for u in units {
            for &cell in h.grid.holdings(u.id) {
                if let Some(other) = holder.insert(cell, u.id) {
                    return Some(format!("{cell} held by both {other} and {}", u.id));
                }
                if h.grid.reservation(cell) != Some(u.id) {
                    return Some(format!("{cell} listed for {} but reserved by {:?}", u.id, h.grid.reservation(cell)));
                }
            }
        }
        units.iter().filter(|u| u.alive).find_map(|u| {
            let here = u.coord.cell();
            holder
                .get(&here)
                .filter(|&&other| other != u.id)
                .map(|other| format!("{} stands in {here} held by {other}", u.id))
        })
    }

    fn cardinal() -> impl Strategy<Value = Facing> {
        prop_oneof![Just(Facing::N), Just(Facing::E), Just(Facing::S), Just(Facing::W)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn no_cell_is_held_twice(
            paths in proptest::collection::vec(proptest::collection::vec(cardinal(), 1..9), 4),
            ticks in 1usize..120,
        ) {
            let engine = DriveEngine::standard();
            let mut h = Harness::road(10, 10);
            let starts = [(2, 2), (7, 2), (2, 7), (7, 7)];
            let mut units: Vec<TestUnit> = starts
                .iter()
                .zip(1..)
                .map(|(&(x, y), id)| TestUnit::new(id, Cell::new(x, y), Dir::N, tank()))
                .collect();
            for (u, path) in units.iter_mut().zip(&paths) {
                h.place(&engine, u);
                h.with(&engine, u, |d| d.queue_path(path));
            }

            for tick in 0..ticks {
                for i in 0..units.len() {
                    h.run(&engine, &mut units[i], 1);
                    let conflict = reservation_conflict(&h, &units);
                    prop_assert!(conflict.is_none(), "tick {}: {}", tick, conflict.unwrap_or_default());
                }
            }
        }
    }

    fn trajectory() -> Vec<(i32, i32, i32, i32)> {
        let engine = DriveEngine::standard();
        let mut h = Harness::road(12, 12);
        let mut a = TestUnit::new(1, Cell::new(2, 10), Dir::N, tank());
        let mut b = TestUnit::new(2, Cell::new(9, 10), Dir::W, jeep());
        h.place(&engine, &mut a);
        h.place(&engine, &mut b);
        h.with(&engine, &mut a, |d| d.assign_destination(Target::Cell(Cell::new(9, 2))));
        h.with(&engine, &mut b, |d| d.assign_destination(Target::Cell(Cell::new(2, 2))));

        let mut out = Vec::new();
        for _ in 0..200 {
            h.run(&engine, &mut a, 1);
            h.run(&engine, &mut b, 1);
            out.push((a.coord.x, a.coord.y, b.coord.x, b.coord.y));
        }
        out
    }

    #[test]
    fn identical_inputs_give_identical_trajectories() {
        assert_eq!(trajectory(), trajectory());
    }
}
