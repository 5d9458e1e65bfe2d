//! End-to-end tests: pool -> model -> microlp -> lineups
//! These run the real solver on small slates

use crate::builder::ModelBuilder;
use crate::config::OptimizerConfig;
use crate::controller::StopReason;
use crate::lineup::Lineup;
use crate::metrics;
use crate::model::VarKind;
use crate::optimizer::LineupOptimizer;
use crate::solver::{LineupSolver, MicroLpSolver, SolveOutcome};
use player_pool::sources::mock;
use player_pool::{Player, PlayerPool, Position};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One QB, two RBs, three WRs, a TE and a DST per team; projections
/// descend so that every team and slot is distinguishable
fn synthetic_slate(teams: usize) -> Vec<Player> {
    let shape = [
        (Position::QB, 1),
        (Position::RB, 2),
        (Position::WR, 3),
        (Position::TE, 1),
        (Position::DST, 1),
    ];

    let mut players = Vec::new();
    for t in 0..teams {
        let team = format!("T{t}");
        for (position, count) in shape {
            for k in 0..count {
                let id = format!("{team}_{position}{k}");
                let proj = 25.0 - t as f64 * 1.3 - k as f64 * 2.1 + position_bonus(position);
                let salary = 3000 + ((t * 7 + k * 3) % 10) as u32 * 300;
                players.push(Player::new(id.clone(), id, position, team.clone(), proj, salary));
            }
        }
    }
    players
}

fn position_bonus(position: Position) -> f64 {
    match position {
        Position::QB => 2.0,
        Position::RB => 0.5,
        Position::WR => 0.0,
        Position::TE => -6.0,
        Position::DST => -12.0,
    }
}

fn assert_lineup_valid(lineup: &Lineup, config: &OptimizerConfig) {
    assert!(lineup.has_valid_shape(), "bad roster shape: {:?}", lineup.ids().collect::<Vec<_>>());
    assert!(metrics::salary(lineup) <= config.salary_cap);
    if let Some(team_max) = config.team_max {
        for (team, count) in metrics::team_exposure(lineup) {
            assert!(count as u32 <= team_max, "{team} has {count} players");
        }
    }
}

fn assert_pairwise_distinct(lineups: &[Lineup]) {
    for (i, a) in lineups.iter().enumerate() {
        for b in &lineups[i + 1..] {
            assert!(metrics::overlap(a, b) <= 8);
        }
    }
}

#[cfg(test)]
#[allow(clippy::module_inception)]
mod integration_tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mock_slate_three_lineups() {
        init_tracing();
        let config = OptimizerConfig { lineup_count: 3, ..Default::default() };
        let lineups =
            LineupOptimizer::new().generate(&mock::players(), &config).unwrap();

        assert_eq!(lineups.len(), 3);
        for lineup in &lineups {
            assert_lineup_valid(lineup, &config);
        }
        assert_pairwise_distinct(&lineups);

        // Rounds are non-increasing in projection
        for pair in lineups.windows(2) {
            assert!(metrics::projection(&pair[0]) + 1e-6 >= metrics::projection(&pair[1]));
        }
    }

    #[test]
    fn test_empty_pool_is_invalid_input() {
        let result = LineupOptimizer::new().generate(&[], &OptimizerConfig::default());
        assert!(matches!(result, Err(crate::OptimizerError::InvalidInput(_))));
    }

    #[test]
    fn test_pool_without_dst_yields_no_lineups() {
        let players: Vec<Player> =
            mock::players().into_iter().filter(|p| !p.is_dst).collect();
        let pool = PlayerPool::new(players).unwrap();

        let generated =
            LineupOptimizer::new().generate_from_pool(&pool, &OptimizerConfig::default()).unwrap();

        assert!(generated.is_empty());
        assert_eq!(generated.stop_reason(), StopReason::Infeasible { round: 0 });
    }

    #[test]
    fn test_exhausted_slate_returns_short_list() {
        // No second roster can avoid every player of the first one
        let pool = PlayerPool::new(mock::players()).unwrap();
        let config = OptimizerConfig {
            lineup_count: 3,
            overlap_max: Some(0),
            ..Default::default()
        };

        let generated = LineupOptimizer::new().generate_from_pool(&pool, &config).unwrap();

        assert_eq!(generated.len(), 1);
        assert_eq!(generated.stop_reason(), StopReason::Infeasible { round: 1 });
        assert_lineup_valid(&generated.lineups()[0], &config);
    }

    #[test]
    fn test_overlap_max_between_every_pair() {
        init_tracing();
        let config = OptimizerConfig {
            lineup_count: 3,
            overlap_max: Some(4),
            ..Default::default()
        };
        let lineups = LineupOptimizer::new().generate(&synthetic_slate(6), &config).unwrap();

        assert_eq!(lineups.len(), 3);
        for (i, a) in lineups.iter().enumerate() {
            assert_lineup_valid(a, &config);
            for b in &lineups[i + 1..] {
                assert!(metrics::overlap(a, b) <= 4);
            }
        }
    }

    #[test]
    fn test_team_max_limits_exposure() {
        let config = OptimizerConfig { lineup_count: 2, team_max: Some(2), ..Default::default() };
        let lineups = LineupOptimizer::new().generate(&synthetic_slate(6), &config).unwrap();

        assert_eq!(lineups.len(), 2);
        for lineup in &lineups {
            assert_lineup_valid(lineup, &config);
        }
    }

    #[test]
    fn test_avg_overlap_bounds_running_total() {
        let config = OptimizerConfig {
            lineup_count: 3,
            avg_overlap_max: Some(5.0),
            ..Default::default()
        };
        let lineups = LineupOptimizer::new().generate(&synthetic_slate(6), &config).unwrap();

        assert_eq!(lineups.len(), 3);
        for (i, lineup) in lineups.iter().enumerate().skip(1) {
            let total: usize = lineups[..i].iter().map(|prior| metrics::overlap(lineup, prior)).sum();
            assert!(total as f64 <= 5.0 * i as f64);
        }
    }

    #[test]
    fn test_zero_penalty_matches_unstacked_model() {
        let pool = PlayerPool::new(synthetic_slate(5)).unwrap();
        let config = OptimizerConfig { stack_penalty: 0.0, ..Default::default() };

        let full = ModelBuilder::new(&pool, &config).build(&[]);
        let mut stripped = full.clone();
        stripped.retain_constraints(|c| {
            !c.name.starts_with("wr_present_") && !c.name.starts_with("unsupported_qb_")
        });
        stripped.objective_mut().retain(|var| var < pool.len());

        let SolveOutcome::Optimal(a) = MicroLpSolver.solve(&full).unwrap() else {
            panic!("full model infeasible");
        };
        let SolveOutcome::Optimal(b) = MicroLpSolver.solve(&stripped).unwrap() else {
            panic!("stripped model infeasible");
        };

        assert!((full.objective_value(&a) - stripped.objective_value(&b)).abs() < 1e-6);
        assert!(full.violated_constraints(&a).is_empty());
    }

    #[test]
    fn test_stack_penalty_prefers_supported_qb() {
        let players = vec![
            // Best QB has no teammate WR at all
            Player::new("QB_A", "Lonely Passer", Position::QB, "AAA", 30.0, 5000),
            Player::new("QB_B", "Stacked Passer", Position::QB, "BBB", 29.0, 5000),
            Player::new("WR_B", "Teammate", Position::WR, "BBB", 15.0, 5000),
            Player::new("WR_C", "Receiver C", Position::WR, "CCC", 14.0, 5000),
            Player::new("WR_D", "Receiver D", Position::WR, "DDD", 13.0, 5000),
            Player::new("WR_E", "Receiver E", Position::WR, "EEE", 12.0, 5000),
            Player::new("RB_C", "Runner C", Position::RB, "CCC", 11.0, 5000),
            Player::new("RB_D", "Runner D", Position::RB, "DDD", 10.0, 5000),
            Player::new("RB_E", "Runner E", Position::RB, "EEE", 9.0, 5000),
            Player::new("TE_F", "Tight End", Position::TE, "FFF", 5.0, 4000),
            Player::new("DST_F", "Defense", Position::DST, "FFF", 3.0, 3000),
        ];

        let unpenalized = OptimizerConfig { lineup_count: 1, ..Default::default() };
        let lineups = LineupOptimizer::new().generate(&players, &unpenalized).unwrap();
        assert!(lineups[0].contains("QB_A"));

        let penalized = OptimizerConfig { stack_penalty: 5.0, ..unpenalized };
        let lineups = LineupOptimizer::new().generate(&players, &penalized).unwrap();
        assert!(lineups[0].contains("QB_B"));
        assert!(lineups[0].contains("WR_B"));
    }

    #[test]
    fn test_indicators_consistent_at_optimum() {
        let pool = PlayerPool::new(synthetic_slate(4)).unwrap();
        let config = OptimizerConfig { stack_penalty: 2.0, ..Default::default() };
        let program = ModelBuilder::new(&pool, &config).build(&[]);

        let SolveOutcome::Optimal(assignment) = MicroLpSolver.solve(&program).unwrap() else {
            panic!("expected optimal");
        };
        let lineup = Lineup::new(
            program.selected_players(&assignment).into_iter().map(|i| pool.players()[i].clone()),
        );

        for (var, variable) in program.variables().iter().enumerate() {
            if let VarKind::WrPresent(team) = &variable.kind {
                let has_wr = lineup.players().any(|p| p.team == *team && p.position == Position::WR);
                assert_eq!(assignment.is_set(var), has_wr, "z_wr_{team}");
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_generated_lineups_are_valid(
            teams in 3usize..6,
            count in 1usize..4,
            team_max in 2u32..5,
        ) {
            let config = OptimizerConfig {
                lineup_count: count,
                team_max: Some(team_max),
                ..Default::default()
            };
            let lineups = LineupOptimizer::new().generate(&synthetic_slate(teams), &config).unwrap();

            prop_assert!(lineups.len() <= count);
            for lineup in &lineups {
                prop_assert!(lineup.has_valid_shape());
                prop_assert!(metrics::salary(lineup) <= config.salary_cap);
                for (_, exposure) in metrics::team_exposure(lineup) {
                    prop_assert!(exposure as u32 <= team_max);
                }
            }
            for (i, a) in lineups.iter().enumerate() {
                for b in &lineups[i + 1..] {
                    prop_assert_ne!(a.fingerprint(), b.fingerprint());
                }
            }
        }
    }
}
