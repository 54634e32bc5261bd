//! Login and the per-role menus.
//!
//! Everything here is line-based text over a [`Console`]; the only full-screen
//! part is the player, reached through [`PlayerView`].

use std::error::Error;
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::accounts::{Role, UserDirectory};
use crate::audio::PlaybackEngine;
use crate::library::{Catalog, MediaItem};

use super::console::Console;

pub type SessionResult<T> = Result<T, Box<dyn Error>>;

/// The playback screen shown after something has been loaded.
pub trait PlayerView {
    fn show(&mut self, engine: &mut PlaybackEngine) -> SessionResult<()>;
}

enum Exit {
    Logout,
    /// Input is exhausted.
    Quit,
}

pub struct Session<'e, R, W, V> {
    console: Console<R, W>,
    catalog: Catalog,
    users: UserDirectory,
    engine: &'e mut PlaybackEngine,
    view: V,
}

fn mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

impl<'e, R: BufRead, W: Write, V: PlayerView> Session<'e, R, W, V> {
    pub fn new(
        console: Console<R, W>,
        catalog: Catalog,
        users: UserDirectory,
        engine: &'e mut PlaybackEngine,
        view: V,
    ) -> Self {
        Self {
            console,
            catalog,
            users,
            engine,
            view,
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        self.console.output()
    }

    /// Log users in and out until input runs out or someone quits at the
    /// login prompt.
    pub fn run(&mut self) -> SessionResult<()> {
        while let Some(user) = self.login()? {
            let is_admin = self.users.get(user).is_some_and(|u| u.is_admin());
            let exit = if is_admin {
                self.admin_menu(user)?
            } else {
                self.client_menu(user)?
            };
            self.engine.stop();
            if let Exit::Quit = exit {
                break;
            }
        }
        Ok(())
    }

    fn login(&mut self) -> SessionResult<Option<usize>> {
        loop {
            self.console.clear()?;
            self.console.say("=== WELCOME TO SPOTIPY ===")?;
            let Some(email) = self.console.prompt("Email (q to quit): ")? else {
                return Ok(None);
            };
            if email.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            let Some(password) = self.console.prompt("Password: ")? else {
                return Ok(None);
            };

            match self.users.authenticate(&email, &password) {
                Ok(index) => {
                    if let Some(user) = self.users.get(index) {
                        self.console.say(format!("Welcome back, {}!", user.name()))?;
                    }
                    return Ok(Some(index));
                }
                Err(e) => {
                    self.console.say(format!("Access error: {e}"))?;
                    if !self.console.pause("(press Enter to try again)")? {
                        return Ok(None);
                    }
                }
            }
        }
    }

    fn client_menu(&mut self, user: usize) -> SessionResult<Exit> {
        loop {
            let name = self.users.get(user).map(|u| u.name().to_string()).unwrap_or_default();
            self.console.clear()?;
            self.console.say(format!("--- {name} ---"))?;
            self.console.say("1. Play a song")?;
            self.console.say("2. Play an album")?;
            self.console.say("3. My playlists")?;
            self.console.say("4. Create playlist")?;
            self.console.say("5. Add a song to a playlist")?;
            self.console.say("6. Remove a song from a playlist")?;
            self.console.say("7. Log out")?;

            let Some(choice) = self.console.prompt(">> ")? else {
                return Ok(Exit::Quit);
            };
            let keep_going = match choice.as_str() {
                "1" => self.play_song()?,
                "2" => self.play_album()?,
                "3" => self.play_playlist(user)?,
                "4" => self.create_playlist(user)?,
                "5" => self.add_to_playlist(user)?,
                "6" => self.remove_from_playlist(user)?,
                "7" => {
                    info!(user = %name, "logout");
                    return Ok(Exit::Logout);
                }
                _ => self.console.pause("Invalid option. (Enter)")?,
            };
            if !keep_going {
                return Ok(Exit::Quit);
            }
        }
    }

    fn list_catalog(&mut self) -> SessionResult<()> {
        self.console.say("--- CATALOG ---")?;
        for (i, track) in self.catalog.tracks().iter().enumerate() {
            self.console.say(format!(
                "{}. {} [{}]",
                i + 1,
                track.display(),
                mmss(track.duration)
            ))?;
        }
        Ok(())
    }

    /// Load `item` and open the player. Returns `false` once input is exhausted.
    fn start(&mut self, item: MediaItem<'_>) -> SessionResult<bool> {
        match self.engine.load(item) {
            Ok(()) => {
                self.view.show(&mut *self.engine)?;
                Ok(true)
            }
            Err(e) => {
                self.console.say(format!("Error: {e}"))?;
                Ok(self.console.pause("(Enter)")?)
            }
        }
    }

    fn play_song(&mut self) -> SessionResult<bool> {
        self.console.clear()?;
        self.list_catalog()?;
        let count = self.catalog.tracks().len();
        let Some(choice) = self.console.pick("Song number (0 to go back): ", count)? else {
            return Ok(false);
        };
        let Some(index) = choice else {
            return Ok(true);
        };
        let track = Arc::clone(self.catalog.track(index)?);
        self.start(MediaItem::Track(&track))
    }

    fn play_album(&mut self) -> SessionResult<bool> {
        self.console.clear()?;
        self.console.say("--- ALBUMS ---")?;
        let lines: Vec<String> = self
            .catalog
            .albums()
            .iter()
            .enumerate()
            .map(|(i, a)| format!("{}. {} ({} songs)", i + 1, a, a.tracks().len()))
            .collect();
        for line in &lines {
            self.console.say(line)?;
        }

        let Some(choice) = self.console.pick("Album number (0 to go back): ", lines.len())? else {
            return Ok(false);
        };
        let Some(index) = choice else {
            return Ok(true);
        };
        let album = self.catalog.album(index)?.clone();
        self.start(MediaItem::Album(&album))
    }

    fn list_playlists(&mut self, user: usize) -> SessionResult<usize> {
        let lines: Vec<String> = self
            .users
            .get(user)
            .map(|u| u.playlists())
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}. {} | {}", i + 1, p, p.description()))
            .collect();
        for line in &lines {
            self.console.say(line)?;
        }
        Ok(lines.len())
    }

    fn play_playlist(&mut self, user: usize) -> SessionResult<bool> {
        self.console.clear()?;
        self.console.say("--- MY PLAYLISTS ---")?;
        let count = self.list_playlists(user)?;
        if count == 0 {
            self.console.say("You have no playlists yet.")?;
            return self.console.pause("(Enter)").map_err(Into::into);
        }

        let Some(choice) = self.console.pick("Playlist to play (0 to go back): ", count)? else {
            return Ok(false);
        };
        let Some(index) = choice else {
            return Ok(true);
        };
        let Some(playlist) = self.users.get(user).and_then(|u| u.playlists().get(index)) else {
            return Ok(true);
        };
        let playlist = playlist.clone();
        self.start(MediaItem::Playlist(&playlist))
    }

    fn create_playlist(&mut self, user: usize) -> SessionResult<bool> {
        self.console.clear()?;
        self.console.say("--- NEW PLAYLIST ---")?;
        let Some(title) = self.console.prompt("Name: ")? else {
            return Ok(false);
        };
        let Some(description) = self.console.prompt("Description: ")? else {
            return Ok(false);
        };

        let created = match self.users.get_mut(user) {
            Some(u) => u.create_playlist(title.as_str(), description).map(|_| ()),
            None => Ok(()),
        };
        match created {
            Ok(()) => self.console.say(format!("Playlist '{title}' created."))?,
            Err(e) => self.console.say(format!("Error: {e}"))?,
        }
        Ok(self.console.pause("(Enter)")?)
    }

    fn add_to_playlist(&mut self, user: usize) -> SessionResult<bool> {
        self.console.clear()?;
        self.console.say("--- MY PLAYLISTS ---")?;
        let count = self.list_playlists(user)?;
        if count == 0 {
            self.console.say("Create a playlist first.")?;
            return self.console.pause("(Enter)").map_err(Into::into);
        }
        let Some(choice) = self.console.pick("Playlist (0 to go back): ", count)? else {
            return Ok(false);
        };
        let Some(playlist_index) = choice else {
            return Ok(true);
        };

        self.list_catalog()?;
        let songs = self.catalog.tracks().len();
        let Some(choice) = self.console.pick("Song to add (0 to go back): ", songs)? else {
            return Ok(false);
        };
        let Some(track_index) = choice else {
            return Ok(true);
        };

        let track = Arc::clone(self.catalog.track(track_index)?);
        if let Some(u) = self.users.get_mut(user) {
            let playlist = u.playlist_mut(playlist_index)?;
            playlist.add_track(Arc::clone(&track));
            self.console
                .say(format!("Added '{}' to '{}'.", track.title, playlist.title()))?;
        }
        Ok(self.console.pause("(Enter)")?)
    }

    fn remove_from_playlist(&mut self, user: usize) -> SessionResult<bool> {
        self.console.clear()?;
        self.console.say("--- MY PLAYLISTS ---")?;
        let count = self.list_playlists(user)?;
        if count == 0 {
            self.console.say("You have no playlists yet.")?;
            return self.console.pause("(Enter)").map_err(Into::into);
        }
        let Some(choice) = self.console.pick("Playlist (0 to go back): ", count)? else {
            return Ok(false);
        };
        let Some(playlist_index) = choice else {
            return Ok(true);
        };
        let Some(playlist) = self
            .users
            .get(user)
            .and_then(|u| u.playlists().get(playlist_index))
            .cloned()
        else {
            return Ok(true);
        };

        if playlist.is_empty() {
            self.console.say(format!("'{}' is empty.", playlist.title()))?;
            return self.console.pause("(Enter)").map_err(Into::into);
        }
        for (i, track) in playlist.tracks().iter().enumerate() {
            self.console.say(format!("{}. {}", i + 1, track.display()))?;
        }
        let Some(choice) = self.console.pick("Song to remove (0 to go back): ", playlist.len())?
        else {
            return Ok(false);
        };
        let Some(track_index) = choice else {
            return Ok(true);
        };
        let Some(track) = playlist.tracks().get(track_index).cloned() else {
            return Ok(true);
        };

        if let Some(u) = self.users.get_mut(user) {
            if u.playlist_mut(playlist_index)?.remove_track(&track).is_some() {
                self.console
                    .say(format!("Removed '{}' from '{}'.", track.title, playlist.title()))?;
            }
        }
        Ok(self.console.pause("(Enter)")?)
    }

    fn admin_menu(&mut self, user: usize) -> SessionResult<Exit> {
        loop {
            let (name, level) = match self.users.get(user) {
                Some(u) => match u.role() {
                    Role::Admin { access_level } => (u.name().to_string(), *access_level),
                    Role::Client { .. } => (u.name().to_string(), 0),
                },
                None => (String::new(), 0),
            };
            self.console.clear()?;
            self.console
                .say(format!("--- ADMIN: {name} (access level {level}) ---"))?;
            self.console.say("1. Catalog statistics")?;
            self.console.say("2. Block / unblock users")?;
            self.console.say("3. Log out")?;

            let Some(choice) = self.console.prompt(">> ")? else {
                return Ok(Exit::Quit);
            };
            let keep_going = match choice.as_str() {
                "1" => {
                    self.console.say(format!(
                        "Catalog: {} songs, {} albums, {} total.",
                        self.catalog.tracks().len(),
                        self.catalog.albums().len(),
                        mmss(self.catalog.total_duration())
                    ))?;
                    self.console.pause("(Enter)")?
                }
                "2" => self.block_users(user)?,
                "3" => {
                    info!(user = %name, "logout");
                    return Ok(Exit::Logout);
                }
                _ => self.console.pause("Invalid option. (Enter)")?,
            };
            if !keep_going {
                return Ok(Exit::Quit);
            }
        }
    }

    fn block_users(&mut self, admin: usize) -> SessionResult<bool> {
        self.console.clear()?;
        self.console.say("--- ACCOUNTS ---")?;
        let clients = self.users.clients();
        if clients.is_empty() {
            self.console.say("(no client accounts)")?;
            return self.console.pause("(Enter)").map_err(Into::into);
        }

        for (n, &i) in clients.iter().enumerate() {
            if let Some(u) = self.users.get(i) {
                let status = if u.is_blocked() { "BLOCKED" } else { "active" };
                self.console
                    .say(format!("{}. {} | {} ({status})", n + 1, u.name(), u.email()))?;
            }
        }

        let Some(choice) = self
            .console
            .pick("Account to block/unblock (0 to cancel): ", clients.len())?
        else {
            return Ok(false);
        };
        let Some(n) = choice else {
            return Ok(true);
        };

        match self.users.toggle_block(admin, clients[n]) {
            Ok(true) => self.console.say("Account blocked.")?,
            Ok(false) => self.console.say("Account unblocked.")?,
            Err(e) => self.console.say(format!("Error: {e}"))?,
        }
        Ok(self.console.pause("(Enter)")?)
    }
}
