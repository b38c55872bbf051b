use madani_estimation::core::GameSession;
use madani_estimation::term::{palette, BoardModel, BoardView, SetupFocus, SetupModel, SetupView, Viewport};
use madani_estimation::types::{PlayerId, ResultShortcut};

fn session() -> GameSession {
    let mut s = GameSession::new();
    s.start(&["Mohammed", "Najlaa", "Ammar"], 250).unwrap();
    s
}

fn model(s: &GameSession, selected: usize) -> BoardModel<'_> {
    BoardModel {
        session: s,
        selected,
        prompt: None,
        status: None,
        celebration: None,
    }
}

fn row_of(fb: &madani_estimation::term::FrameBuffer, needle: &str) -> Option<u16> {
    (0..fb.height()).find(|&y| fb.row_text(y).contains(needle))
}

#[test]
fn term_board_marks_selected_player() {
    let s = session();
    let fb = BoardView::new().render(&model(&s, 1), Viewport::new(120, 30));

    let y = row_of(&fb, "Najlaa").unwrap();
    assert_eq!(fb.get(2, y).unwrap().ch, '>');
    let other = row_of(&fb, "Ammar").unwrap();
    assert_eq!(fb.get(2, other).unwrap().ch, ' ');
}

#[test]
fn term_board_highlights_totals_at_target() {
    let mut s = session();
    s.edit_scores(vec![(PlayerId::from_seat(0), 250)]).unwrap();
    let fb = BoardView::new().render(&model(&s, 2), Viewport::new(120, 30));

    let y = row_of(&fb, "1  Mohammed").unwrap();
    let total_cell = (0..fb.width())
        .filter_map(|x| fb.get(x, y))
        .find(|c| c.ch == '5')
        .unwrap();
    assert_eq!(total_cell.style.fg, palette::ACCENT);
    assert!(total_cell.style.bold);
}

#[test]
fn term_board_colors_results_by_outcome() {
    let mut s = session();
    let id = PlayerId::from_seat(2);
    s.record_prediction(&id, 3).unwrap();
    s.record_shortcut_result(&id, ResultShortcut::Exact).unwrap();
    let fb = BoardView::new().render(&model(&s, 0), Viewport::new(120, 30));

    let y = row_of(&fb, "Ammar").unwrap();
    let text = fb.row_text(y);
    let x = text.find("exact +30").unwrap() as u16;
    assert_eq!(fb.get(x, y).unwrap().style.fg, palette::EXACT);
}

#[test]
fn term_setup_renders_target_focus() {
    let names = vec!["Mohammed".to_string(); 4];
    let model = SetupModel {
        names: &names,
        focus: SetupFocus::Target,
        target_score: 750,
        status: None,
    };
    let fb = SetupView::new().render(&model, Viewport::new(100, 20));
    let y = row_of(&fb, "< 750 >").unwrap();
    assert!(fb.row_text(y).contains("> Target"));
}
