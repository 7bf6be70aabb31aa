//! Handlers registered on every new dispatcher.

use super::model::{Envelope, Reply};

pub fn handle_start(envelope: &Envelope) -> Reply {
    tracing::info!(user_id = envelope.user_id, "handling /start");
    Reply::reply("Welcome to ServidorGame!")
}

/// Regular text messages
pub fn handle_text_input(envelope: &Envelope) -> Reply {
    tracing::info!(
        user_id = envelope.user_id,
        data = %envelope.message.data_for_log(),
        "handling text input"
    );
    Reply::reply("Text received")
}

/// Callback queries triggered by inline buttons
pub fn handle_callback_query(envelope: &Envelope) -> Reply {
    tracing::info!(
        user_id = envelope.user_id,
        data = %envelope.message.data_for_log(),
        "handling callback query"
    );
    Reply::reply("Callback processed")
}

pub fn handle_button_click(envelope: &Envelope) -> Reply {
    tracing::info!(
        user_id = envelope.user_id,
        data = %envelope.message.data_for_log(),
        "handling button click"
    );
    Reply::reply("Button clicked")
}

/// Selections from custom keyboards or menus
pub fn handle_menu_selection(envelope: &Envelope) -> Reply {
    tracing::info!(
        user_id = envelope.user_id,
        data = %envelope.message.data_for_log(),
        "handling menu selection"
    );
    Reply::reply("Menu option chosen")
}
