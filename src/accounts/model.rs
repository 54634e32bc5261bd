use crate::error::{Error, Result};
use crate::library::Playlist;

#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    /// A listener with their own playlists.
    Client { playlists: Vec<Playlist> },
    /// Manages the catalog and other accounts.
    Admin { access_level: u8 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    name: String,
    email: String,
    password: String,
    blocked: bool,
    role: Role,
}

impl User {
    pub fn client(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::with_role(name, email, password, Role::Client { playlists: Vec::new() })
    }

    pub fn admin(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::with_role(name, email, password, Role::Admin { access_level: 1 })
    }

    fn with_role(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            blocked: false,
            role,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin { .. })
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub(crate) fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    /// Check a login attempt. A suspended account is refused before the
    /// password is even looked at.
    pub fn verify_password(&self, attempt: &str) -> Result<()> {
        if self.blocked {
            return Err(Error::AccountBlocked(self.email.clone()));
        }
        if attempt != self.password {
            return Err(Error::WrongPassword(self.email.clone()));
        }
        Ok(())
    }

    /// The user's playlists; administrators have none.
    pub fn playlists(&self) -> &[Playlist] {
        match &self.role {
            Role::Client { playlists } => playlists,
            Role::Admin { .. } => &[],
        }
    }

    pub fn playlist_mut(&mut self, index: usize) -> Result<&mut Playlist> {
        match &mut self.role {
            Role::Client { playlists } => playlists
                .get_mut(index)
                .ok_or(Error::PlaylistNotFound(index)),
            Role::Admin { .. } => Err(Error::PlaylistNotFound(index)),
        }
    }

    pub fn create_playlist(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<&mut Playlist> {
        match &mut self.role {
            Role::Client { playlists } => {
                playlists.push(Playlist::new(title, description));
                let last = playlists.len() - 1;
                Ok(&mut playlists[last])
            }
            Role::Admin { .. } => Err(Error::permission_denied(
                "administrators do not own playlists",
            )),
        }
    }
}
