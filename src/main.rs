mod click;
mod format;
mod logger;
mod pencil;
mod time;

use std::{cell::RefCell, io, rc::Rc};

use click::{pixel_y_to_row, ClickState};
use pencil::config::SessionConfig;
use pencil::save::LocalStore;
use pencil::session::Session;
use pencil::PencilGame;
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::PerformanceClock;

/// Query the grid container's bounding rect and convert a pixel Y to a row.
fn dom_pixel_to_row(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<u16> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    if (mouse_x as f64) < rect.left() {
        return None;
    }
    pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logger::init();

    let session = Session::new(PerformanceClock, LocalStore, SessionConfig::default());
    let game = Rc::new(RefCell::new(PencilGame::new(session)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let key = dom_pixel_to_row(mouse_event.x, mouse_event.y, &cs)
                .and_then(|row| cs.find_target_key(row));
            drop(cs);

            if let Some(key) = key {
                game.borrow_mut().handle_key(key);
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut().handle_key(c);
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            let mut g = game.borrow_mut();
            g.tick();
            g.render(f, size, &click_state);
        }
    });

    Ok(())
}
