//! Unit tests for dr-mission.

#[cfg(test)]
mod helpers {
    use dr_core::{BuildingId, Cell, HouseId};
    use crate::{Building, BuildingKind, BuildingRegistry};

    pub fn registry() -> BuildingRegistry {
        let mut r = BuildingRegistry::new();
        r.add(Building::new(BuildingId(0), BuildingKind::Refinery, HouseId(0), Cell::new(4, 4))).unwrap();
        r.add(Building::new(BuildingId(1), BuildingKind::RepairBay, HouseId(0), Cell::new(8, 2))).unwrap();
        r.add(Building::new(BuildingId(2), BuildingKind::WeaponsFactory, HouseId(0), Cell::new(1, 1))).unwrap();
        r
    }
}

// ── Radio protocol ────────────────────────────────────────────────────────────

#[cfg(test)]
mod radio {
    use dr_core::{BuildingId, Cell, HouseId, UnitId};
    use crate::{Building, BuildingKind, MissionError, Radio, RadioMessage};
    use super::helpers::registry;

    const REFINERY: BuildingId = BuildingId(0);

    #[test]
    fn hello_opens_single_channel() {
        let mut r = registry();
        assert_eq!(r.transmit(UnitId(1), RadioMessage::Hello, REFINERY), RadioMessage::Roger);
        assert_eq!(r.contact_of(UnitId(1)), Some(REFINERY));
        assert_eq!(r.transmit(UnitId(2), RadioMessage::Hello, REFINERY), RadioMessage::Negative);
        assert_eq!(r.transmit(UnitId(1), RadioMessage::Hello, REFINERY), RadioMessage::Roger);
    }

    #[test]
    fn docking_requires_contact() {
        let mut r = registry();
        assert_eq!(r.transmit(UnitId(1), RadioMessage::Docking, REFINERY), RadioMessage::Negative);
        r.transmit(UnitId(1), RadioMessage::Hello, REFINERY);
        assert_eq!(r.transmit(UnitId(1), RadioMessage::Docking, REFINERY), RadioMessage::Roger);
        assert_eq!(r.transmit(UnitId(1), RadioMessage::ImIn, REFINERY), RadioMessage::Roger);
        assert!(r.get(REFINERY).unwrap().is_docked());
    }

    #[test]
    fn over_and_out_closes() {
        let mut r = registry();
        r.transmit(UnitId(1), RadioMessage::Hello, REFINERY);
        assert_eq!(r.transmit(UnitId(2), RadioMessage::OverAndOut, REFINERY), RadioMessage::Static);
        assert_eq!(r.transmit(UnitId(1), RadioMessage::OverAndOut, REFINERY), RadioMessage::Roger);
        assert_eq!(r.contact_of(UnitId(1)), None);
        assert_eq!(r.transmit(UnitId(2), RadioMessage::Hello, REFINERY), RadioMessage::Roger);
    }

    #[test]
    fn factory_refuses_and_unknown_is_static() {
        let mut r = registry();
        assert_eq!(r.transmit(UnitId(1), RadioMessage::Hello, BuildingId(2)), RadioMessage::Negative);
        assert_eq!(r.transmit(UnitId(1), RadioMessage::Hello, BuildingId(99)), RadioMessage::Static);
    }

    #[test]
    fn sign_off_and_duplicates() {
        let mut r = registry();
        r.transmit(UnitId(5), RadioMessage::Hello, BuildingId(1));
        r.sign_off(UnitId(5));
        assert!(!r.get(BuildingId(1)).unwrap().in_radio_contact());
        let dup = Building::new(REFINERY, BuildingKind::Refinery, HouseId(0), Cell::new(0, 0));
        assert!(matches!(r.add(dup), Err(MissionError::DuplicateBuilding(_))));
        assert!(matches!(r.get(BuildingId(42)), Err(MissionError::UnknownBuilding(_))));
        assert_eq!(r.len(), 3);
    }
}

// ── Missions ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod missions {
    use dr_core::{Cell, Target, UnitId};
    use crate::{Mission, MissionControl, Missionable, Targetable};

    #[test]
    fn override_and_restore() {
        let mut m = MissionControl::new(Mission::Move);
        m.assign_target(Target::Unit(UnitId(3)));
        m.override_mission(Mission::Attack, Target::Cell(Cell::new(1, 1)));
        assert_eq!(m.mission(), Mission::Attack);
        assert_eq!(m.tar_com(), Target::Cell(Cell::new(1, 1)));

        // A second override keeps the first suspended mission.
        m.override_mission(Mission::Hunt, Target::None);
        m.restore_mission();
        assert_eq!(m.mission(), Mission::Move);
        assert_eq!(m.tar_com(), Target::Unit(UnitId(3)));
        assert_eq!(m.suspended, None);
    }

    #[test]
    fn mission_classes() {
        assert!(Mission::Sleep.is_paralyzed());
        assert!(!Mission::Move.is_paralyzed());
        assert!(Mission::GuardArea.accepts_close_enough());
        assert!(!Mission::Enter.accepts_close_enough());
        assert_eq!(Mission::GuardArea.to_string(), "guard_area");
    }
}
