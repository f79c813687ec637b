use std::cell::RefCell;
use std::rc::Rc;

use ui_headless::shortcut::{KeyPress, KeyShortcut, Platform};

use super::*;
use crate::interop::{self, register_shortcut, ShortcutHandle};

/// Key caps for `shortcut`, with Apple modifier glyphs on Apple platforms.
fn key_labels(shortcut: &KeyShortcut, platform: Platform) -> Vec<String> {
    let modifiers = match platform {
        Platform::Apple => [
            (shortcut.ctrl, "⌃"),
            (shortcut.alt, "⌥"),
            (shortcut.shift, "⇧"),
            (shortcut.meta, "⌘"),
        ],
        Platform::Other => [
            (shortcut.ctrl, "Ctrl"),
            (shortcut.alt, "Alt"),
            (shortcut.shift, "Shift"),
            (shortcut.meta, "Meta"),
        ],
    };
    let key = match shortcut.key.as_str() {
        " " => "Space".to_string(),
        key if key.chars().count() == 1 => key.to_uppercase(),
        key => key.to_string(),
    };
    modifiers
        .into_iter()
        .filter(|(held, _)| *held)
        .map(|(_, label)| label.to_string())
        .chain(std::iter::once(key))
        .collect()
}

/// Calls `callback` whenever `shortcut` is pressed while the current owner is alive.
///
/// `mod` resolves to Command on Apple platforms and Ctrl elsewhere. An unparsable shortcut
/// is logged and never fires.
pub fn use_keyboard_shortcut(shortcut: &str, callback: impl Fn(KeyPress) + 'static) {
    let parsed = match KeyShortcut::parse_for(shortcut, interop::platform()) {
        Ok(parsed) => parsed,
        Err(err) => {
            logging::warn!("{err}");
            return;
        }
    };
    let handle: Rc<RefCell<Option<ShortcutHandle>>> = match register_shortcut(parsed, callback) {
        Ok(handle) => Rc::new(RefCell::new(Some(handle))),
        Err(err) => {
            logging::warn!("{err}");
            return;
        }
    };
    on_cleanup(move || {
        handle.borrow_mut().take();
    });
}

#[component]
/// Single key cap.
pub fn Kbd(#[prop(optional, into)] class: Option<String>, children: Children) -> impl IntoView {
    view! {
        <kbd
            class=merge_class(
                "pointer-events-none inline-flex h-5 min-w-5 select-none items-center justify-center gap-1 rounded-sm bg-muted px-1 font-sans text-xs font-medium text-muted-foreground",
                class.as_deref(),
            )
            data-slot="kbd"
        >
            {children()}
        </kbd>
    }
}

#[component]
/// Key caps for `shortcut`; with `on_trigger` the shortcut is also bound while mounted.
pub fn KeyboardShortcut(
    #[prop(into)] shortcut: String,
    #[prop(optional)] on_trigger: Option<Callback<KeyPress>>,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let platform = interop::platform();
    let labels = match KeyShortcut::parse_for(&shortcut, platform) {
        Ok(parsed) => key_labels(&parsed, platform),
        Err(err) => {
            logging::warn!("{err}");
            return ().into_view();
        }
    };
    if let Some(on_trigger) = on_trigger {
        use_keyboard_shortcut(&shortcut, move |press| on_trigger.call(press));
    }

    view! {
        <span
            class=merge_class("inline-flex items-center gap-1", class.as_deref())
            aria-keyshortcuts=shortcut
            data-slot="kbd-group"
        >
            {labels.into_iter().map(|label| view! { <Kbd>{label}</Kbd> }).collect_view()}
        </span>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn apple_labels_use_glyphs() {
        let shortcut = KeyShortcut::parse_for("mod+shift+k", Platform::Apple).expect("shortcut");
        assert_eq!(key_labels(&shortcut, Platform::Apple), vec!["⇧", "⌘", "K"]);
    }

    #[test]
    fn other_labels_spell_modifiers() {
        let shortcut = KeyShortcut::parse("mod+Space").expect("shortcut");
        assert_eq!(key_labels(&shortcut, Platform::Other), vec!["Ctrl", "Space"]);
    }
}
