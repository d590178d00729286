//! Systems driving families through a schedule

use std::rc::Rc;

use kinship::{Error, Family, Result, Schedule, System, World};

#[derive(Debug, Default)]
struct Position(f32);
#[derive(Debug, Default)]
struct Velocity(f32);
#[derive(Debug, Default)]
struct Expired;

struct Movement {
    movers: Rc<Family>,
}

impl System for Movement {
    fn name(&self) -> &str {
        "movement"
    }

    fn update(&mut self, world: &World, delta: f32) -> Result<()> {
        let positions = world.store::<Position>();
        let velocities = world.store::<Velocity>();
        self.movers.try_iterate(|e| {
            let v = velocities.get(e)?.0;
            positions.get_mut(e)?.0 += v * delta;
            Ok::<(), Error>(())
        })
    }
}

struct Reaper {
    expired: Rc<Family>,
}

impl System for Reaper {
    fn update(&mut self, world: &World, _delta: f32) -> Result<()> {
        self.expired.try_iterate(|e| world.destroy(e))
    }
}

#[test]
fn schedule_moves_and_reaps() {
    let world = World::new();
    let movers = world.family(|f| f.all_of::<Position>().all_of::<Velocity>());
    let expired = world.family(|f| f.all_of::<Expired>());
    let mut schedule = Schedule::new()
        .with_system(Movement {
            movers: Rc::clone(&movers),
        })
        .with_system(Reaper {
            expired: Rc::clone(&expired),
        });

    let runner = world.create();
    world.store::<Position>().register(runner, Position(0.0)).unwrap();
    world.store::<Velocity>().register(runner, Velocity(2.0)).unwrap();
    let doomed = world.create();
    world.store::<Expired>().register(doomed, Expired).unwrap();

    schedule.run(&world, 0.5).unwrap();
    schedule.run(&world, 0.5).unwrap();

    assert!((world.store::<Position>().get(runner).unwrap().0 - 2.0).abs() < f32::EPSILON);
    assert!(!world.contains(doomed));
    assert!(expired.is_empty());
    assert_eq!(movers.entity_ids(), vec![runner]);
}

#[test]
fn failing_system_reports_its_name() {
    let world = World::new();
    let movers = world.family(|f| f.all_of::<Position>().none_of::<Expired>());
    let mut schedule = Schedule::new().with_system(Movement { movers });

    let e = world.create();
    world.store::<Position>().register(e, Position(0.0)).unwrap();

    let err = schedule.run(&world, 1.0).unwrap_err();

    assert!(matches!(err.kind, kinship::ErrorKind::NotPresent { .. }));
    assert_eq!(err.context.unwrap().operation.as_deref(), Some("movement"));
}
