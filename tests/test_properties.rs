use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use spaceship_shooter::compute::*;
use spaceship_shooter::consts::*;
use spaceship_shooter::entities::*;

fn arb_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(left, right, fire)| TickInput { left, right, fire })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_for_any_input_sequence(
        seed in any::<u64>(),
        inputs in prop::collection::vec(arb_input(), 1..400),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = init_state();

        for input in &inputs {
            let before = state.score;
            let was_playing = state.status == GameStatus::Playing;
            state = tick(&state, input, &mut rng);

            prop_assert!((0..=SCREEN_WIDTH - PLAYER_WIDTH).contains(&state.player.x));
            prop_assert!(state.bullets.len() <= MAX_PLAYER_BULLETS);
            prop_assert!(state.bullets.iter().all(|b| b.y >= 0));
            prop_assert!(state.enemy_bullets.iter().all(|b| b.y <= SCREEN_HEIGHT));
            prop_assert!(state.enemies.iter().all(|e| e.y <= SCREEN_HEIGHT));
            if was_playing {
                prop_assert!(state.score >= before);
                prop_assert_eq!((state.score - before) % SCORE_PER_ENEMY, 0);
            } else {
                prop_assert_eq!(state.score, before);
            }

            if state.status == GameStatus::GameOver {
                state = restart(&state);
                prop_assert_eq!(state.score, 0);
                prop_assert!(state.enemies.is_empty());
                prop_assert!(state.bullets.is_empty());
                prop_assert!(state.enemy_bullets.is_empty());
            }
        }
    }

    #[test]
    fn movement_never_leaves_screen(x in 0..=750i32, steps in 0usize..200, left in any::<bool>()) {
        let mut s = init_state();
        s.player.x = x;
        for _ in 0..steps {
            s = if left { move_player_left(&s) } else { move_player_right(&s) };
        }
        prop_assert!(s.player.x >= 0 && s.player.right() <= SCREEN_WIDTH);
    }
}
