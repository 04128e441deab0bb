//! Property tests for the numeric contracts of needs, satisfaction and hiring.

use hecs::World;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use towersim_core::prelude::*;
use towersim_core::systems::{
    interaction_system, job_matcher_system, spawn_system, update_satisfaction, Spawner,
};

fn need_kind() -> impl Strategy<Value = NeedKind> {
    prop::sample::select(NeedKind::ALL.to_vec())
}

fn facility_kind() -> impl Strategy<Value = FacilityKind> {
    prop::sample::select(vec![
        FacilityKind::Office,
        FacilityKind::Restaurant,
        FacilityKind::Arcade,
        FacilityKind::Theater,
        FacilityKind::Hotel,
        FacilityKind::RetailShop,
        FacilityKind::FlagshipStore,
        FacilityKind::Lobby,
    ])
}

proptest! {
    #[test]
    fn reduce_stays_in_bounds(
        start in 0.0f32..=100.0,
        amount in -500.0f32..500.0,
        kind in need_kind(),
    ) {
        let mut needs = Needs::new(Archetype::Casual);
        needs.reduce(kind, -start);
        needs.reduce(kind, amount);
        let value = needs.get(kind);
        prop_assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn full_window_removes_forty(
        seed in any::<u64>(),
        dt in 0.05f32..3.0,
        kind in prop::sample::select(vec![
            FacilityKind::Restaurant,
            FacilityKind::Arcade,
            FacilityKind::Hotel,
            FacilityKind::FlagshipStore,
        ]),
    ) {
        let config = SimConfig::default();
        let mut facilities = FacilityRegistry::new();
        facilities.register(Facility::new(kind, 2, 0, 4));
        let served = kind.serves().unwrap();

        let mut needs = Needs::new(Archetype::Casual);
        needs.reduce(served, -100.0);
        let mut actor = Actor::new("Visitor 1", NpcKind::Visitor, 2, 1.0);
        actor.motion = MotionState::AtDestination;
        let mut world = World::new();
        let entity = world.spawn((actor, VisitorInfo::new(VisitorActivity::Visiting), needs));

        let mut rng = StdRng::seed_from_u64(seed);
        let ticks = (31.0 / dt).ceil() as usize + 1;
        for _ in 0..ticks {
            interaction_system(&mut world, &mut facilities, &config, &mut rng, dt);
        }

        let visitor = world.get::<&VisitorInfo>(entity).unwrap();
        prop_assert!(!visitor.is_interacting);
        prop_assert!(visitor.required_interaction_time >= 15.0);
        prop_assert!(visitor.required_interaction_time < 30.0);
        let needs = world.get::<&Needs>(entity).unwrap();
        prop_assert!((needs.get(served) - 60.0).abs() < 1e-2, "left {}", needs.get(served));
    }

    #[test]
    fn satisfaction_stays_in_bounds(
        score in -50.0f32..150.0,
        hunger in 0.0f32..=100.0,
        entertainment in 0.0f32..=100.0,
        comfort in 0.0f32..=100.0,
        shopping in 0.0f32..=100.0,
        updates in 1usize..50,
    ) {
        let config = SimConfig::default();
        let needs = Needs { hunger, entertainment, comfort, shopping, archetype: Archetype::Tourist };
        let mut satisfaction = Satisfaction::new(score);
        for _ in 0..updates {
            update_satisfaction(&mut satisfaction, &needs, &config);
            prop_assert!((0.0..=100.0).contains(&satisfaction.score));
        }
    }

    #[test]
    fn openings_never_go_negative(
        kinds in prop::collection::vec((facility_kind(), 0u32..3), 1..8),
        seekers in 0usize..20,
        passes in 1usize..5,
    ) {
        let mut facilities = FacilityRegistry::new();
        let mut offered = 0;
        for (floor, (kind, openings)) in kinds.into_iter().enumerate() {
            let id = facilities.register(Facility::new(kind, floor as i32 + 1, 0, 4));
            facilities.get_mut(id).unwrap().job_openings = openings;
            if kind.job_posting().is_some() {
                offered += openings;
            }
        }
        let before = facilities.total_openings();

        let mut world = World::new();
        for _ in 0..seekers {
            world.spawn((
                Actor::new("Seeker", NpcKind::Visitor, 0, 0.0),
                VisitorInfo::new(VisitorActivity::JobSeeking),
                Needs::new(Archetype::BusinessPerson),
                Satisfaction::default(),
            ));
        }
        let mut spawner = Spawner::new(100);
        let mut hired = 0;
        for _ in 0..passes {
            hired += job_matcher_system(&mut world, &mut facilities, &mut spawner);
        }

        prop_assert_eq!(hired, offered.min(seekers as u32));
        prop_assert_eq!(facilities.total_openings(), before - hired);

        for (_, (visitor, job)) in world
            .query::<(Option<&VisitorInfo>, Option<&EmploymentInfo>)>()
            .iter()
        {
            prop_assert!(!(visitor.is_some() && job.is_some()));
        }
    }

    #[test]
    fn spawning_respects_cap(
        cap in 0u32..10,
        seed in any::<u64>(),
        steps in 1usize..200,
        dt in 0.1f32..20.0,
    ) {
        let config = SimConfig::default();
        let mut facilities = FacilityRegistry::new();
        facilities.register(Facility::new(FacilityKind::Restaurant, 1, 0, 4));
        let mut spawner = Spawner::new(cap);
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..steps {
            spawn_system(&mut world, &facilities, &mut spawner, &config, &mut rng, dt);
            let active = world
                .query::<&Actor>()
                .iter()
                .filter(|(_, a)| a.kind == NpcKind::Visitor)
                .count();
            prop_assert!(active <= cap as usize);
        }
    }
}
