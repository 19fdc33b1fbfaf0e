//! Behaviour-driven tests using rust-rspec.
//!
//! These tests follow a drill through losing a life and coming back.

use drill_arena::events::{CombatantEvent, EffectCue};
use drill_arena::{Combatant, PlayerIndex};
use test_utils::{airborne, drain, run_ticks};

#[derive(Clone, Debug)]
struct RespawnWorld {
    drill: Combatant,
    events: Vec<CombatantEvent>,
}

impl Default for RespawnWorld {
    fn default() -> Self {
        Self {
            drill: airborne(0, 2.0),
            events: Vec::new(),
        }
    }
}

impl RespawnWorld {
    fn knock_out(&mut self) {
        *self = Self::default();
        self.drill.hurt(self.drill.max_health());
        run_ticks(&mut self.drill, 5);
        self.events = drain(&mut self.drill);
    }

    fn respawn(&mut self) {
        self.drill.respawn();
        self.events = drain(&mut self.drill);
    }

    fn wait(&mut self, ticks: usize) {
        run_ticks(&mut self.drill, ticks);
        self.events.extend(drain(&mut self.drill));
    }

    fn saw(&self, event: CombatantEvent) -> bool {
        self.events.contains(&event)
    }
}

#[test]
fn drill_comes_back_after_losing_a_life() {
    rspec::run(&rspec::given(
        "a drill that has just lost its last health",
        RespawnWorld::default(),
        |ctx| {
            ctx.before_each(|world| world.knock_out());

            ctx.then("it leaves the scene with one life fewer", |world| {
                assert!(!world.drill.is_present());
                assert_eq!(world.drill.lives_left(), 4);
                assert!(world.saw(CombatantEvent::Deactivated {
                    player: PlayerIndex(0)
                }));
            });

            ctx.when("it respawns", |ctx| {
                ctx.before_each(|world| world.respawn());

                ctx.then("it is back on its spawn point, frozen and blinking", |world| {
                    assert!(world.drill.is_present());
                    assert!(world.drill.is_frozen());
                    assert!(world.drill.is_invulnerable());
                    assert!((world.drill.health() - world.drill.max_health()).abs() < f32::EPSILON);
                    assert_eq!(world.drill.position(), glam::Vec2::new(2.0, 5.0));
                    assert!(world.saw(CombatantEvent::Effect(EffectCue::SetVisible(true))));
                    assert!(world.saw(CombatantEvent::Effect(EffectCue::SetBlink(true))));
                });

                ctx.when("half a second passes", |ctx| {
                    ctx.before_each(|world| world.wait(25));

                    ctx.then("it is released but still invulnerable", |world| {
                        assert!(!world.drill.is_frozen());
                        assert!(world.drill.is_invulnerable());
                        assert!(!world.drill.is_blinking());
                        assert!(world.saw(CombatantEvent::Released {
                            player: PlayerIndex(0)
                        }));
                    });
                });

                ctx.when("a full second passes", |ctx| {
                    ctx.before_each(|world| world.wait(50));

                    ctx.then("invulnerability has worn off", |world| {
                        assert!(!world.drill.is_invulnerable());
                        assert!(world.drill.position().y < 5.0);
                    });
                });
            });
        },
    ));
}

#[test]
fn respawn_before_deactivation_cancels_it() {
    rspec::run(&rspec::given(
        "a drill respawned on the tick it lost a life",
        RespawnWorld::default(),
        |ctx| {
            ctx.before_each(|world| {
                *world = RespawnWorld::default();
                world.drill.hurt(world.drill.max_health());
                world.respawn();
                world.wait(10);
            });

            ctx.then("it stays in the scene", |world| {
                assert!(world.drill.is_present());
                assert!(!world.saw(CombatantEvent::Deactivated {
                    player: PlayerIndex(0)
                }));
            });
        },
    ));
}
