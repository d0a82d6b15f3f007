use crate::api::error::SimError;
use crate::core::session::Session;
use crate::renderer::sink::{CirclePrimitive, Color, RectPrimitive, RenderSink};

/// Issue draw calls for every body in the session.
/// Order: static boundaries, the control body, then active projectiles in
/// slot order.
pub fn draw_session(
    session: &Session,
    sink: &mut dyn RenderSink,
    projectile_color: Color,
) -> Result<(), SimError> {
    let world = &session.world;

    for boundary in session.arena.boundaries() {
        let (center, rotation) = world
            .transform(&boundary.body)
            .ok_or(SimError::MissingBody("boundary"))?;
        sink.draw_rect(&RectPrimitive {
            center,
            size: boundary.size,
            rotation,
            color: boundary.color,
        });
    }

    let (center, rotation) = session.control.transform(world)?;
    sink.draw_rect(&RectPrimitive {
        center,
        size: session.control.size(),
        rotation,
        color: session.control.color(),
    });

    let radius = session.pool.params().radius;
    session.pool.for_each_active(|_, body| {
        // Sweep already culled bodies missing from the world.
        if let Some((center, rotation)) = world.transform(body) {
            sink.draw_circle(&CirclePrimitive {
                center,
                radius,
                rotation,
                color: projectile_color,
            });
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SimConfig;
    use crate::renderer::buffer::{DrawBuffer, KIND_CIRCLE, KIND_RECT};
    use glam::Vec2;

    #[test]
    fn draws_boundaries_control_then_projectiles() {
        let config = SimConfig::cannon();
        let mut session = Session::new(&config);
        session
            .pool
            .spawn(&mut session.world, Vec2::new(30.0, 30.0), 0.0, Vec2::ZERO)
            .unwrap();

        let mut sink = DrawBuffer::new();
        sink.clear(Color::BLACK);
        draw_session(&session, &mut sink, Color::WHITE).unwrap();

        assert_eq!(sink.instance_count() as usize, config.boundaries.len() + 2);
        assert_eq!(sink.instances_of(KIND_RECT).count(), config.boundaries.len() + 1);
        let control = sink.instances[config.boundaries.len()];
        assert_eq!((control.x, control.y), (10.0, 50.0));
        assert_eq!((control.width, control.height), (15.0, 10.0));

        let ball = sink.instances_of(KIND_CIRCLE).next().unwrap();
        assert_eq!(ball.width, 2.0 * config.projectile.radius);
        assert!((ball.x - 30.0).abs() < 1e-4);
    }
}
