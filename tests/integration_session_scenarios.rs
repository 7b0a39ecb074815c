use assert_matches::assert_matches;

use digitar::normalize::normalize;
use digitar::{Metrics, Phase, Session, SessionError, SessionLength};

fn submit(session: &mut Session, word: &str) {
    session.update_input(word).unwrap();
    session.submit_word().unwrap();
}

#[test]
fn two_words_one_wrong_finishes_at_half_accuracy() {
    let mut session = Session::new("gato casa", SessionLength::OneMinute).unwrap();
    session.start().unwrap();

    submit(&mut session, "gato");
    submit(&mut session, "xasa");

    let snap = session.snapshot();
    assert_eq!(snap.cursor, 2);
    assert_eq!(snap.correct_words, 1);
    assert_eq!(snap.metrics.accuracy, 50);
    assert_eq!(snap.phase, Phase::Finished);
}

#[test]
fn sixty_ticks_finish_a_one_minute_session() {
    let mut session = Session::new("gato casa", SessionLength::OneMinute).unwrap();
    session.start().unwrap();

    for n in 1..=60 {
        session.tick().unwrap();
        assert_eq!(session.snapshot().remaining_secs, 60 - n);
    }

    let snap = session.snapshot();
    assert_eq!(snap.remaining_secs, 0);
    assert_eq!(snap.phase, Phase::Finished);
    assert_eq!(
        snap.metrics,
        Metrics {
            wpm: 0,
            lpm: 0,
            accuracy: 0
        }
    );
}

#[test]
fn final_rates_use_the_full_duration() {
    let mut session = Session::new("um dois três quatro", SessionLength::TwoMinutes).unwrap();
    session.start().unwrap();
    submit(&mut session, "um");
    submit(&mut session, "dois");
    submit(&mut session, "tres");

    for _ in 0..120 {
        session.tick().unwrap();
    }

    let snap = session.snapshot();
    assert_eq!(snap.phase, Phase::Finished);
    // 3 words and "um "+"dois "+"tres " = 13 letters over two minutes
    assert_eq!(snap.metrics.wpm, 2);
    assert_eq!(snap.metrics.lpm, 7);
    assert_eq!(snap.metrics.accuracy, 100);
}

#[test]
fn pause_freezes_the_countdown() {
    let mut session = Session::new("gato casa", SessionLength::OneMinute).unwrap();
    session.start().unwrap();
    session.tick().unwrap();
    session.toggle_pause().unwrap();

    for _ in 0..5 {
        assert_matches!(
            session.tick(),
            Err(SessionError::InvalidPhaseTransition {
                phase: Phase::Paused,
                ..
            })
        );
    }
    assert_eq!(session.snapshot().remaining_secs, 59);
}

#[test]
fn restart_clears_everything_but_the_duration() {
    let mut session = Session::new("gato casa rua", SessionLength::ThreeMinutes).unwrap();
    session.start().unwrap();
    submit(&mut session, "gato");
    session.update_input("ca").unwrap();
    session.tick().unwrap();

    let preparations: [fn(&mut Session); 3] = [
        |_| {},
        |s| s.toggle_pause().unwrap(),
        |s| {
            for _ in 0..180 {
                s.tick().ok();
            }
        },
    ];
    for prepare in preparations {
        prepare(&mut session);
        session.restart();

        let snap = session.snapshot();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.cursor, 0);
        assert_eq!(snap.input, "");
        assert_eq!(snap.correct_words, 0);
        assert_eq!(snap.correct_letters, 0);
        assert_eq!(snap.remaining_secs, 180);
    }
}

#[test]
fn accuracy_tracks_cursor_after_every_submission() {
    let text = "O rato roeu a roupa do rei de Roma.";
    let mut session = Session::new(text, SessionLength::OneMinute).unwrap();
    session.start().unwrap();

    let typed = ["o", "Rato", "roeo", "", "roupa", "do", "rey", "de", "roma."];
    for word in typed {
        submit(&mut session, word);
        let snap = session.snapshot();
        assert!(snap.correct_words <= snap.cursor);
        assert!(snap.cursor <= snap.words.len());
        let expected = (snap.correct_words as f64 / snap.cursor.max(1) as f64 * 100.0).round();
        assert_eq!(snap.metrics.accuracy as f64, expected);
    }

    let snap = session.snapshot();
    assert_eq!(snap.phase, Phase::Finished);
    assert_eq!(snap.correct_words, 6);
}

#[test]
fn normalization_is_case_and_accent_insensitive() {
    assert_eq!(normalize("Rápido"), normalize("rapido"));
    assert_eq!(normalize("rapido"), "rapido");
    assert_eq!(normalize(&normalize("Digitação")), normalize("Digitação"));
}
