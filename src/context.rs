//! The runtime context a menu executes in, and the frontend seam it
//! talks to the chat platform through.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::MenuConfig;
use crate::data::database::Database;
use crate::data::SettingsCache;
use crate::error::SendError;
use crate::id::{GuildId, UserId};
use crate::ui::{InteractedComponent, MessageComponents, Modal};

/// A message to present to the user, with optional attached components.
#[derive(Debug, Clone, Copy)]
pub struct Prompt<'a> {
    pub content: &'a str,
    pub components: Option<&'a MessageComponents>,
}

impl<'a> Prompt<'a> {
    pub fn text(content: &'a str) -> Self {
        Self {
            content,
            components: None,
        }
    }

    pub fn with_components(content: &'a str, components: &'a MessageComponents) -> Self {
        Self {
            content,
            components: Some(components),
        }
    }
}

/// An opaque handle to a message the frontend sent on our behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle(pub u64);

/// Something the user did in the channel while a menu was waiting.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// A plain text message.
    Message { author: UserId, content: String },
    /// A click on a button or a select menu submission.
    ComponentClick { user: UserId, custom_id: String },
    /// A submitted modal, with the echoed component tree.
    ModalSubmit {
        user: UserId,
        custom_id: String,
        components: Vec<InteractedComponent>,
    },
}

impl Response {
    pub fn user(&self) -> UserId {
        match self {
            Response::Message { author, .. } => *author,
            Response::ComponentClick { user, .. } => *user,
            Response::ModalSubmit { user, .. } => *user,
        }
    }

    /// The custom ID of the interacted component, if this was an
    /// interaction.
    pub fn custom_id(&self) -> Option<&str> {
        match self {
            Response::Message { .. } => None,
            Response::ComponentClick { custom_id, .. } => Some(custom_id),
            Response::ModalSubmit { custom_id, .. } => Some(custom_id),
        }
    }

    /// The free-form text carried by this response: message content, or
    /// the first submitted modal value.
    pub fn text(&self) -> Option<&str> {
        match self {
            Response::Message { content, .. } => Some(content),
            Response::ComponentClick { .. } => None,
            Response::ModalSubmit { components, .. } => {
                components.iter().find_map(InteractedComponent::first_value)
            }
        }
    }
}

/// Everything a menu needs from the chat platform. Implementations wrap
/// a gateway connection; tests substitute a scripted double.
#[async_trait]
pub trait Frontend: Send {
    /// Presents a prompt in the channel the menu runs in.
    async fn present(&mut self, prompt: Prompt<'_>) -> Result<Option<MessageHandle>, SendError>;

    /// The next user action, or `None` once the event stream is closed.
    async fn next_response(&mut self) -> Option<Response>;

    /// Sends an ephemeral notice to a single user.
    async fn send_notice(&mut self, user: UserId, content: &str) -> Result<(), SendError>;

    /// Opens a modal in response to the pending interaction.
    async fn open_modal(&mut self, modal: &Modal) -> Result<(), SendError>;

    /// Deletes a message previously returned by [`present`](Frontend::present).
    async fn delete_message(&mut self, handle: MessageHandle) -> Result<(), SendError>;
}

/// The state a running menu carries: who it serves, where it runs, and
/// the storage it writes through.
pub struct MenuContext {
    pub author: UserId,
    pub guild: Option<GuildId>,
    pub frontend: Box<dyn Frontend>,
    pub cache: Arc<Mutex<SettingsCache>>,
    pub database: Arc<dyn Database>,
    pub config: MenuConfig,
}

impl MenuContext {
    /// The settings cache, recovered if a writer panicked mid-update.
    pub fn lock_cache(&self) -> std::sync::MutexGuard<'_, SettingsCache> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::VecDeque;

    use tokio::sync::mpsc;

    use super::*;
    use crate::data::database::{DbError, SqlArg};

    /// Everything a [`MockFrontend`] was asked to do, in order.
    #[derive(Debug, Default)]
    pub struct FrontendLog {
        pub presented: Vec<(String, Option<Vec<String>>)>,
        pub notices: Vec<(UserId, String)>,
        pub modals: Vec<Modal>,
        pub deleted: Vec<MessageHandle>,
    }

    /// A scripted frontend: responses come from a channel, actions are
    /// recorded in a shared log.
    pub struct MockFrontend {
        responses: mpsc::UnboundedReceiver<Response>,
        pub log: Arc<Mutex<FrontendLog>>,
        next_handle: u64,
    }

    impl MockFrontend {
        pub fn new() -> (Self, mpsc::UnboundedSender<Response>, Arc<Mutex<FrontendLog>>) {
            let (tx, rx) = mpsc::unbounded_channel();
            let log = Arc::new(Mutex::new(FrontendLog::default()));
            let frontend = Self {
                responses: rx,
                log: Arc::clone(&log),
                next_handle: 0,
            };
            (frontend, tx, log)
        }
    }

    #[async_trait]
    impl Frontend for MockFrontend {
        async fn present(
            &mut self,
            prompt: Prompt<'_>,
        ) -> Result<Option<MessageHandle>, SendError> {
            let ids = prompt.components.map(MessageComponents::custom_ids);
            self.log
                .lock()
                .unwrap()
                .presented
                .push((prompt.content.to_string(), ids));
            self.next_handle += 1;
            Ok(Some(MessageHandle(self.next_handle)))
        }

        async fn next_response(&mut self) -> Option<Response> {
            self.responses.recv().await
        }

        async fn send_notice(&mut self, user: UserId, content: &str) -> Result<(), SendError> {
            self.log
                .lock()
                .unwrap()
                .notices
                .push((user, content.to_string()));
            Ok(())
        }

        async fn open_modal(&mut self, modal: &Modal) -> Result<(), SendError> {
            self.log.lock().unwrap().modals.push(modal.clone());
            Ok(())
        }

        async fn delete_message(&mut self, handle: MessageHandle) -> Result<(), SendError> {
            self.log.lock().unwrap().deleted.push(handle);
            Ok(())
        }
    }

    /// A database double that records every statement and can be
    /// scripted to fail specific calls.
    #[derive(Debug, Default)]
    pub struct MockDatabase {
        pub calls: Mutex<Vec<(String, Vec<SqlArg>)>>,
        pub failures: Mutex<VecDeque<DbError>>,
    }

    impl MockDatabase {
        /// Queues an error for the next `execute` call.
        pub fn fail_next(&self, error: DbError) {
            self.failures.lock().unwrap().push_back(error);
        }
    }

    #[async_trait]
    impl Database for MockDatabase {
        async fn execute(&self, sql: &str, args: &[SqlArg]) -> Result<u64, DbError> {
            self.calls
                .lock()
                .unwrap()
                .push((sql.to_string(), args.to_vec()));
            if let Some(error) = self.failures.lock().unwrap().pop_front() {
                return Err(error);
            }
            Ok(1)
        }
    }

    /// A ready-to-use context wired to a [`MockFrontend`].
    pub fn context(
        author: UserId,
        guild: Option<GuildId>,
    ) -> (
        MenuContext,
        mpsc::UnboundedSender<Response>,
        Arc<Mutex<FrontendLog>>,
        Arc<MockDatabase>,
    ) {
        let (frontend, tx, log) = MockFrontend::new();
        let database = Arc::new(MockDatabase::default());
        let ctx = MenuContext {
            author,
            guild,
            frontend: Box::new(frontend),
            cache: Arc::new(Mutex::new(SettingsCache::default())),
            database: Arc::clone(&database) as Arc<dyn Database>,
            config: MenuConfig::default(),
        };
        (ctx, tx, log, database)
    }
}
