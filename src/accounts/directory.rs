use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::library::Catalog;

use super::model::User;

/// Every registered account, looked up by email.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// An administrator plus one client who already has a playlist built from
    /// the catalog's second and third songs.
    pub fn demo(catalog: &Catalog) -> Self {
        let mut directory = Self::new();

        let admin = User::admin("Super Admin", "admin@spotipy.com", "admin123");

        let mut client = User::client("Juan Perez", "juan@gmail.com", "1234");
        if let Ok(favorites) = client.create_playlist("Mis Favoritas", "Rock y Pop") {
            for track in catalog.tracks().iter().skip(1).take(2) {
                favorites.add_track(Arc::clone(track));
            }
        }

        for user in [admin, client] {
            if let Err(e) = directory.register(user) {
                warn!(error = %e, "demo account not seeded");
            }
        }
        directory
    }

    pub fn register(&mut self, user: User) -> Result<usize> {
        if self.users.iter().any(|u| u.email() == user.email()) {
            return Err(Error::AlreadyRegistered(user.email().to_string()));
        }
        info!(email = user.email(), admin = user.is_admin(), "account registered");
        self.users.push(user);
        Ok(self.users.len() - 1)
    }

    /// Log in. Returns the index of the authenticated user.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<usize> {
        let index = self
            .users
            .iter()
            .position(|u| u.email() == email)
            .ok_or_else(|| Error::UserNotFound(email.to_string()))?;

        if let Err(e) = self.users[index].verify_password(password) {
            warn!(email, error = %e, "login refused");
            return Err(e);
        }
        info!(email, "login");
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Option<&User> {
        self.users.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut User> {
        self.users.get_mut(index)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Indices of every non-admin account, in registration order.
    pub fn clients(&self) -> Vec<usize> {
        self.users
            .iter()
            .enumerate()
            .filter(|(_, u)| !u.is_admin())
            .map(|(i, _)| i)
            .collect()
    }

    /// Suspend or reinstate `target` on behalf of `actor`. Returns the new
    /// blocked flag.
    pub fn toggle_block(&mut self, actor: usize, target: usize) -> Result<bool> {
        let actor_user = self
            .users
            .get(actor)
            .ok_or_else(|| Error::UserNotFound(format!("#{actor}")))?;
        if !actor_user.is_admin() {
            return Err(Error::permission_denied("only administrators can block accounts"));
        }

        let target_user = self
            .users
            .get_mut(target)
            .ok_or_else(|| Error::UserNotFound(format!("#{target}")))?;
        if target_user.is_admin() {
            return Err(Error::permission_denied("administrators cannot be blocked"));
        }

        let blocked = !target_user.is_blocked();
        target_user.set_blocked(blocked);
        info!(email = target_user.email(), blocked, "account block toggled");
        Ok(blocked)
    }
}
