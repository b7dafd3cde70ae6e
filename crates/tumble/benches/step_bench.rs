use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use tumble::{GroundPlane, PhysicsWorld, RigidBody, WorldConfig};

fn tumbling_world() -> PhysicsWorld {
    let mut body = RigidBody::cube(1.0, 0.5).with_position(Vec3::new(0.0, 5.0, 0.0));
    body.linear_velocity = Vec3::new(1.5, 5.0, -1.0);
    body.angular_velocity = Vec3::new(6.0, 2.0, 9.0);
    PhysicsWorld::new(WorldConfig::default(), GroundPlane::default(), body)
        .expect("default config is valid")
}

fn bench_airborne_step(c: &mut Criterion) {
    let mut world = tumbling_world();

    c.bench_function("airborne_step", |b| {
        b.iter(|| {
            // Keep the body high above the plane so no contacts are solved
            world.body_mut().position.y = 100.0;
            world.step(black_box(1.0 / 60.0));
        })
    });
}

fn bench_full_roll(c: &mut Criterion) {
    // Spin-up, bounces and settle: the cost of one whole roll
    c.bench_function("full_roll_600_steps", |b| {
        b.iter(|| {
            let mut world = tumbling_world();
            for _ in 0..600 {
                world.step(black_box(1.0 / 60.0));
            }
            world.body().position
        })
    });
}

criterion_group!(benches, bench_airborne_step, bench_full_roll);
criterion_main!(benches);
