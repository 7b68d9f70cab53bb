use tui_textarea::Input;

use super::ChatResponse;
use super::TransportError;

pub enum Event {
    BackendResponse(Result<ChatResponse, TransportError>),
    KeyboardCharInput(Input),
    KeyboardChip(usize),
    KeyboardCTRLC(),
    KeyboardCTRLT(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIResize(u16, u16),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
