//! Console rendering: the chat surface, header, and map summaries.

use colored::Colorize;

use nearbot_application::{Header, HeaderAction, IdentityBadge, MapView, Viewport};
use nearbot_core::chat::{ChatEvent, ChatSurface, MessageSender};

/// Prints chat events as they happen.
pub struct ConsoleSurface;

impl ChatSurface for ConsoleSurface {
    fn on_event(&self, event: ChatEvent) {
        match event {
            ChatEvent::MessageAppended(message) => match message.sender {
                MessageSender::User => {
                    println!("{} {}", "you>".bold(), message.body.text());
                }
                MessageSender::Assistant => {
                    println!("{} {}", "assistant>".green().bold(), message.body.text());
                }
            },
            ChatEvent::TypingStarted(label) => {
                println!("{}", label.dimmed());
            }
            ChatEvent::TypingCleared => {}
            ChatEvent::StoreCards(stores) => {
                println!("{}", "Nearby stores:".bold());
                for (index, store) in stores.iter().enumerate() {
                    println!(
                        "  {}. {} - {}",
                        index + 1,
                        store.name.blue().bold(),
                        store.description
                    );
                }
                println!(
                    "{}",
                    "Pick one with /focus <n> to see it on the map.".dimmed()
                );
            }
            ChatEvent::MapUpdated => {}
            ChatEvent::Alert(text) => {
                println!("{}", text.yellow());
            }
        }
    }
}

/// Prints the chat header for the current session.
pub fn print_header(header: &Header) {
    let identity = match &header.identity {
        IdentityBadge::Avatar { picture, name } => {
            format!("{} ({})", name, picture.dimmed())
        }
        IdentityBadge::Named { name } => name.clone(),
        IdentityBadge::Guest => "Guest".to_string(),
    };
    let action_hint = match header.action {
        HeaderAction::Logout => "/logout to sign out",
        HeaderAction::Login => "/login to sign in",
    };
    println!("{} | {} | {}", header.title.bold(), identity, action_hint.dimmed());
}

/// Prints the current map state.
pub fn print_map(map: &MapView) {
    match map.viewport() {
        Viewport::Centered { center, zoom } => {
            println!(
                "Map centered at ({:.6}, {:.6}), zoom {}",
                center.lat, center.lng, zoom
            );
        }
        Viewport::Fitted { bounds, padding } => {
            println!(
                "Map fitted to ({:.6}, {:.6})..({:.6}, {:.6}), padding {}",
                bounds.min_lat, bounds.min_lng, bounds.max_lat, bounds.max_lng, padding
            );
        }
    }

    if let Some(user) = map.user_marker() {
        println!("  you: ({:.6}, {:.6})", user.lat, user.lng);
    }
    for marker in map.store_markers() {
        let name = marker.popup.lines().next().unwrap_or("");
        let open = if marker.popup_open { " (popup open)" } else { "" };
        println!("  pin: {} ({:.6}, {:.6}){}", name, marker.lat, marker.lng, open);
    }
}

pub fn print_help() {
    println!("Commands:");
    println!("  /location    check your current location");
    println!("  /focus <n>   center the map on store card n");
    println!("  /map         show the current map state");
    println!("  /login       show the sign-in link");
    println!("  /logout      sign out (asks for confirmation)");
    println!("  /quit        exit");
    println!("Anything else is sent to the assistant.");
}
