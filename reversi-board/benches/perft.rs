use criterion::*;

#[cfg(unix)]
use pprof::criterion::{Output, PProfProfiler};

use reversi_board::test_utils::perft;
use reversi_board::{Action, Game};

fn criterion_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(50);

    for depth in 1..7 {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| perft::run_perft(black_box(depth)))
        });
    }

    group.finish();
}

/// Play a whole game through the checked layer, always taking the first legal square.
fn first_square_game() -> Game {
    let mut game = Game::default();
    while !game.is_finished() {
        let action = game.get_moves().next().map_or(Action::Pass, Action::Play);
        game = match game.apply_move(action) {
            Ok(next) => next,
            Err(_) => break,
        };
    }
    game
}

fn criterion_game(c: &mut Criterion) {
    c.bench_function("checked game", |b| b.iter(|| black_box(first_square_game())));
}

#[cfg(unix)]
criterion_group! {
    name = perft;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_perft, criterion_game
}

#[cfg(not(unix))]
criterion_group! {
    name = perft;
    config = Criterion::default();
    targets = criterion_perft, criterion_game
}

criterion_main!(perft);
