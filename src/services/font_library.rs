// src/services/font_library.rs
//
// FontBook resolves which font the text buffer draws with. A directly
// supplied font handle always wins over the named family. External font
// files load on a worker thread and are polled once per frame; a newer
// request supersedes an older one by replacing the stored channel, so a
// stale completion simply goes nowhere.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

use rusttype::Font;

use crate::error::EffectError;

struct PendingLoad {
    receiver: Receiver<Result<Font<'static>, EffectError>>,
    path: PathBuf,
}

pub struct FontBook {
    named: HashMap<String, PathBuf>,
    family: String,
    resolved_family: Option<Font<'static>>,
    external: Option<Font<'static>>,
    pending: Option<PendingLoad>,
}

impl FontBook {
    /// Build the registry and try to resolve the initial family. A family
    /// that cannot be resolved is not fatal; the buffer just stays blank
    /// until a font arrives.
    pub fn new(family: &str, named: HashMap<String, PathBuf>) -> Self {
        let mut book = Self {
            named,
            family: family.to_string(),
            resolved_family: None,
            external: None,
            pending: None,
        };
        if book.named.contains_key(family) {
            book.set_family(family);
        } else if !family.is_empty() {
            eprintln!("Warning: initial font family '{family}' is not registered");
        }
        book
    }

    /// The font the text buffer should draw with right now.
    pub fn current(&self) -> Option<&Font<'static>> {
        self.external.as_ref().or(self.resolved_family.as_ref())
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn available(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.named.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn register(&mut self, name: &str, path: PathBuf) {
        self.named.insert(name.to_string(), path);
    }

    /// Switch to a registered named family. Clears any external font, as
    /// choosing a family means choosing it over a loaded file. Returns
    /// whether the switch happened.
    pub fn set_family(&mut self, name: &str) -> bool {
        let path = match self.named.get(name) {
            Some(p) => p.clone(),
            None => {
                eprintln!("Warning: font family '{name}' not found");
                println!("Available families: {:?}", self.available());
                return false;
            }
        };

        match load_font_file(&path) {
            Ok(font) => {
                self.family = name.to_string();
                self.resolved_family = Some(font);
                self.external = None;
                println!("Font family set: {name}");
                true
            }
            Err(e) => {
                eprintln!("Warning: {e}; keeping previous font");
                false
            }
        }
    }

    /// Hand over an already-parsed font. Takes precedence over the family.
    pub fn set_external(&mut self, font: Font<'static>) {
        self.external = Some(font);
    }

    /// Drop the external font; the named family becomes active again.
    pub fn clear_external(&mut self) {
        self.external = None;
    }

    /// Kick off an asynchronous load of a font file. Replaces any load
    /// still in flight.
    pub fn load_external<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref().to_path_buf();
        let (sender, receiver) = channel();
        let thread_path = path.clone();

        thread::spawn(move || {
            // The send fails when a newer request superseded this one;
            // that is the intended way for a stale load to die.
            let _ = sender.send(load_font_file(&thread_path));
        });

        self.pending = Some(PendingLoad { receiver, path });
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Poll the in-flight load, once per frame. Returns true when a new
    /// font arrived and the text buffer should repaint. Failures warn and
    /// leave the previously active font in place.
    pub fn poll(&mut self) -> bool {
        let pending = match &self.pending {
            Some(p) => p,
            None => return false,
        };

        match pending.receiver.try_recv() {
            Ok(Ok(font)) => {
                println!("Font loaded: {}", pending.path.display());
                self.external = Some(font);
                self.pending = None;
                true
            }
            Ok(Err(e)) => {
                eprintln!("Warning: {e}; falling back to '{}'", self.family);
                self.pending = None;
                false
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                eprintln!("Warning: font load worker vanished; falling back");
                self.pending = None;
                false
            }
        }
    }
}

fn load_font_file(path: &Path) -> Result<Font<'static>, EffectError> {
    let data = fs::read(path)
        .map_err(|e| EffectError::FontLoad(format!("reading {}: {e}", path.display())))?;
    Font::try_from_vec(data).ok_or_else(|| {
        EffectError::FontLoad(format!("unsupported font format: {}", path.display()))
    })
}
