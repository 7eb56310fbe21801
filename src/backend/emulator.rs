//! In-process backend
//!
//! [`EmulatorBackend`] implements both [`AuthService`] and [`DocumentStore`] over
//! shared in-memory state so the demo runs without network access. It mirrors the
//! observable behaviour a client sees from the hosted service:
//!
//! - creating an account signs it in
//! - unknown email and wrong password both report `auth/invalid-credential`
//! - passwords shorter than [`MIN_PASSWORD_LEN`] report `auth/weak-password`
//! - with [`RulesMode::SignedIn`], data access without a session is denied
//! - document ids are 20 characters, creation times come from the server clock
//! - listeners fire immediately on registration and after every change
//!
//! Everything is single-threaded: state lives in a [`RefCell`] and listener callbacks
//! run after the state borrow is released, so a callback may call back into the
//! backend.

use super::auth::{AuthListener, AuthService, User};
use super::error::{AuthError, AuthErrorCode, BackendError, StoreError, StoreErrorCode};
use super::store::{
    DocumentStore, Message, MessagePatch, NewMessage, OrderBy,
    SnapshotListener, TimestampField,
};
use super::ListenerId;
use crate::config::{EmulatorConfig, RulesMode};
use chrono::Utc;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use uuid::Uuid;

/// Shortest password accepted when creating an account
pub const MIN_PASSWORD_LEN: usize = 6;

const DOCUMENT_ID_LEN: usize = 20;
const UID_LEN: usize = 28;

struct Account {
    uid: String,
    password: String,
}

struct StoredDoc {
    message: Message,
    /// Insertion order, used to break ordering ties
    seq: u64,
}

struct QueryListener {
    id: ListenerId,
    collection: String,
    order: OrderBy,
    callback: Rc<RefCell<SnapshotListener>>,
}

#[derive(Default)]
struct EmulatorState {
    accounts: FxHashMap<String, Account>,
    current_user: Option<User>,
    collections: FxHashMap<String, BTreeMap<String, StoredDoc>>,
    auth_listeners: Vec<(ListenerId, Rc<RefCell<AuthListener>>)>,
    query_listeners: Vec<QueryListener>,
    next_listener: u64,
    next_seq: u64,
}

impl EmulatorState {
    fn allocate_listener_id(&mut self) -> ListenerId {
        self.next_listener += 1;
        ListenerId(self.next_listener)
    }

    fn allocate_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

/// Auth and document store sharing one in-memory state
pub struct EmulatorBackend {
    project_id: String,
    settings: EmulatorConfig,
    state: RefCell<EmulatorState>,
}

/// Project ids are 6-30 characters of lowercase letters, digits and hyphens,
/// starting with a letter and not ending with a hyphen.
pub fn is_valid_project_id(id: &str) -> bool {
    let len_ok = (6..=30).contains(&id.len());
    let chars_ok = id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    let starts_ok = id.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    len_ok && chars_ok && starts_ok && !id.ends_with('-')
}

fn generate_id(len: usize) -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(len);
    id
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl EmulatorBackend {
    pub fn new(project_id: &str, settings: EmulatorConfig) -> Result<Self, BackendError> {
        if !is_valid_project_id(project_id) {
            return Err(BackendError::InvalidProjectId(project_id.to_string()));
        }
        log::info!(
            "Emulator backend started for project '{}' (auth_enabled={}, rules={:?})",
            project_id,
            settings.auth_enabled,
            settings.rules
        );
        Ok(EmulatorBackend {
            project_id: project_id.to_string(),
            settings,
            state: RefCell::new(EmulatorState::default()),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Number of live queries currently registered
    pub fn live_query_count(&self) -> usize {
        self.state.borrow().query_listeners.len()
    }

    /// Number of session listeners currently registered
    pub fn auth_listener_count(&self) -> usize {
        self.state.borrow().auth_listeners.len()
    }

    fn ensure_auth_enabled(&self) -> Result<(), AuthError> {
        if self.settings.auth_enabled {
            Ok(())
        } else {
            Err(AuthError::from_code(AuthErrorCode::ConfigurationNotFound))
        }
    }

    fn check_access(&self, state: &EmulatorState) -> Result<(), StoreError> {
        match self.settings.rules {
            RulesMode::Open => Ok(()),
            RulesMode::SignedIn if state.current_user.is_some() => Ok(()),
            RulesMode::SignedIn => Err(StoreError::permission_denied()),
        }
    }

    fn query_result(
        &self,
        state: &EmulatorState,
        collection: &str,
        order: OrderBy,
    ) -> Result<Vec<Message>, StoreError> {
        self.check_access(state)?;

        let mut docs: Vec<&StoredDoc> = state
            .collections
            .get(collection)
            .map(|docs| docs.values().collect())
            .unwrap_or_default();

        match order {
            OrderBy::CreatedAt => {
                docs.retain(|d| d.message.created_at.is_some());
                docs.sort_by(|a, b| {
                    a.message
                        .created_at
                        .cmp(&b.message.created_at)
                        .then(a.seq.cmp(&b.seq))
                });
            }
        }

        Ok(docs.into_iter().map(|d| d.message.clone()).collect())
    }

    fn auth_listener_live(&self, id: ListenerId) -> bool {
        self.state
            .borrow()
            .auth_listeners
            .iter()
            .any(|(listener_id, _)| *listener_id == id)
    }

    fn query_listener_live(&self, id: ListenerId) -> bool {
        self.state
            .borrow()
            .query_listeners
            .iter()
            .any(|l| l.id == id)
    }

    /// Replace the session and notify listeners if the identity changed
    fn set_current_user(&self, user: Option<User>) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let changed = state.current_user.as_ref().map(|u| &u.uid)
                != user.as_ref().map(|u| &u.uid);
            state.current_user = user;
            changed
        };
        if changed {
            self.notify_auth_listeners();
        }
    }

    fn notify_auth_listeners(&self) {
        let (user, listeners) = {
            let state = self.state.borrow();
            (state.current_user.clone(), state.auth_listeners.clone())
        };
        for (id, callback) in listeners {
            // A previous callback may have removed this one
            if self.auth_listener_live(id) {
                let mut callback = callback.borrow_mut();
                (*callback)(user.clone());
            }
        }
    }

    fn notify_query_listeners(&self, collection: &str) {
        type Delivery = (
            ListenerId,
            Rc<RefCell<SnapshotListener>>,
            Result<Vec<Message>, StoreError>,
        );
        let deliveries: Vec<Delivery> = {
            let state = self.state.borrow();
            state
                .query_listeners
                .iter()
                .filter(|l| l.collection == collection)
                .map(|l| {
                    (
                        l.id,
                        Rc::clone(&l.callback),
                        self.query_result(&state, &l.collection, l.order),
                    )
                })
                .collect()
        };
        for (id, callback, result) in deliveries {
            if self.query_listener_live(id) {
                let mut callback = callback.borrow_mut();
                (*callback)(result);
            }
        }
    }
}

impl AuthService for EmulatorBackend {
    fn create_account(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.ensure_auth_enabled()?;
        if !is_plausible_email(email) {
            return Err(AuthError::from_code(AuthErrorCode::Other(
                "auth/invalid-email".to_string(),
            )));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::new(
                AuthErrorCode::WeakPassword,
                "Firebase: Password should be at least 6 characters (auth/weak-password).",
            ));
        }

        let user = {
            let mut state = self.state.borrow_mut();
            if state.accounts.contains_key(email) {
                return Err(AuthError::from_code(AuthErrorCode::EmailAlreadyInUse));
            }
            let uid = generate_id(UID_LEN);
            state.accounts.insert(
                email.to_string(),
                Account {
                    uid: uid.clone(),
                    password: password.to_string(),
                },
            );
            User {
                uid,
                email: email.to_string(),
            }
        };

        log::debug!("Created account {} ({})", user.email, user.uid);
        self.set_current_user(Some(user.clone()));
        Ok(user)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.ensure_auth_enabled()?;
        if !is_plausible_email(email) {
            return Err(AuthError::from_code(AuthErrorCode::Other(
                "auth/invalid-email".to_string(),
            )));
        }
        if password.is_empty() {
            return Err(AuthError::from_code(AuthErrorCode::Other(
                "auth/missing-password".to_string(),
            )));
        }

        let user = {
            let state = self.state.borrow();
            match state.accounts.get(email) {
                Some(account) if account.password == password => User {
                    uid: account.uid.clone(),
                    email: email.to_string(),
                },
                _ => return Err(AuthError::from_code(AuthErrorCode::InvalidCredential)),
            }
        };

        log::debug!("Signed in {}", user.email);
        self.set_current_user(Some(user.clone()));
        Ok(user)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        log::debug!("Signed out");
        self.set_current_user(None);
        Ok(())
    }

    fn current_user(&self) -> Option<User> {
        self.state.borrow().current_user.clone()
    }

    fn on_auth_state_changed(&self, listener: AuthListener) -> ListenerId {
        let callback = Rc::new(RefCell::new(listener));
        let (id, user) = {
            let mut state = self.state.borrow_mut();
            let id = state.allocate_listener_id();
            state.auth_listeners.push((id, Rc::clone(&callback)));
            (id, state.current_user.clone())
        };
        log::info!("Auth listener {:?} registered", id);
        let mut callback = callback.borrow_mut();
        (*callback)(user);
        id
    }

    fn remove_auth_listener(&self, id: ListenerId) {
        self.state
            .borrow_mut()
            .auth_listeners
            .retain(|(listener_id, _)| *listener_id != id);
        log::info!("Auth listener {:?} removed", id);
    }
}

impl DocumentStore for EmulatorBackend {
    fn insert(&self, collection: &str, message: NewMessage) -> Result<String, StoreError> {
        let id = {
            let mut state = self.state.borrow_mut();
            self.check_access(&state)?;

            let id = generate_id(DOCUMENT_ID_LEN);
            let created_at = match message.created_at {
                TimestampField::Server => Some(Utc::now()),
                TimestampField::Unset => None,
            };
            let seq = state.allocate_seq();
            state.collections.entry(collection.to_string()).or_default().insert(
                id.clone(),
                StoredDoc {
                    message: Message {
                        id: id.clone(),
                        text: message.text,
                        author_email: message.author_email,
                        created_at,
                    },
                    seq,
                },
            );
            id
        };

        log::debug!("Inserted {}/{}", collection, id);
        self.notify_query_listeners(collection);
        Ok(id)
    }

    fn fetch_all(&self, collection: &str) -> Result<Vec<Message>, StoreError> {
        let state = self.state.borrow();
        self.check_access(&state)?;
        let messages: Vec<Message> = state
            .collections
            .get(collection)
            .map(|docs| docs.values().map(|d| d.message.clone()).collect())
            .unwrap_or_default();
        log::debug!("Fetched {} document(s) from {}", messages.len(), collection);
        Ok(messages)
    }

    fn update(&self, collection: &str, id: &str, patch: MessagePatch) -> Result<(), StoreError> {
        {
            let mut state = self.state.borrow_mut();
            self.check_access(&state)?;

            let doc = state
                .collections
                .get_mut(collection)
                .and_then(|docs| docs.get_mut(id))
                .ok_or_else(|| {
                    StoreError::new(
                        StoreErrorCode::NotFound,
                        format!(
                            "No document to update: projects/{}/databases/(default)/documents/{}/{}",
                            self.project_id, collection, id
                        ),
                    )
                })?;
            doc.message.text = patch.text;
        }

        log::debug!("Updated {}/{}", collection, id);
        self.notify_query_listeners(collection);
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        {
            let mut state = self.state.borrow_mut();
            self.check_access(&state)?;
            // Deleting a missing document succeeds, like the hosted service
            if let Some(docs) = state.collections.get_mut(collection) {
                docs.remove(id);
            }
        }

        log::debug!("Deleted {}/{}", collection, id);
        self.notify_query_listeners(collection);
        Ok(())
    }

    fn subscribe(
        &self,
        collection: &str,
        order: OrderBy,
        listener: SnapshotListener,
    ) -> ListenerId {
        let callback = Rc::new(RefCell::new(listener));
        let (id, initial) = {
            let mut state = self.state.borrow_mut();
            let id = state.allocate_listener_id();
            state.query_listeners.push(QueryListener {
                id,
                collection: collection.to_string(),
                order,
                callback: Rc::clone(&callback),
            });
            (id, self.query_result(&state, collection, order))
        };

        log::info!(
            "Live query {:?} on {} ordered by {} registered",
            id,
            collection,
            order.field_name()
        );
        let mut callback = callback.borrow_mut();
        (*callback)(initial);
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.state
            .borrow_mut()
            .query_listeners
            .retain(|l| l.id != id);
        log::info!("Live query {:?} removed", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn open_backend() -> EmulatorBackend {
        EmulatorBackend::new(
            "demo-project",
            EmulatorConfig {
                auth_enabled: true,
                rules: RulesMode::Open,
            },
        )
        .unwrap()
    }

    fn new_message(text: &str) -> NewMessage {
        NewMessage {
            text: text.to_string(),
            author_email: "anon".to_string(),
            created_at: TimestampField::Server,
        }
    }

    #[test]
    fn test_project_id_validation() {
        assert!(is_valid_project_id("spojen"));
        assert!(is_valid_project_id("my-project-42"));
        assert!(!is_valid_project_id("short"));
        assert!(!is_valid_project_id("Upper-case"));
        assert!(!is_valid_project_id("1starts-with-digit"));
        assert!(!is_valid_project_id("trailing-"));
        assert!(EmulatorBackend::new("Bad Id", EmulatorConfig::default()).is_err());
    }

    #[test]
    fn test_weak_password_and_duplicate_email() {
        let backend = open_backend();
        let err = backend.create_account("a@b.hr", "123").unwrap_err();
        assert_eq!(err.code, AuthErrorCode::WeakPassword);

        backend.create_account("a@b.hr", "123456").unwrap();
        let err = backend.create_account("a@b.hr", "654321").unwrap_err();
        assert_eq!(err.code, AuthErrorCode::EmailAlreadyInUse);
    }

    #[test]
    fn test_invalid_email_passes_other_code() {
        let backend = open_backend();
        let err = backend.sign_in("not-an-email", "secret1").unwrap_err();
        assert_eq!(
            err.code,
            AuthErrorCode::Other("auth/invalid-email".to_string())
        );
    }

    #[test]
    fn test_sign_in_wrong_password() {
        let backend = open_backend();
        backend.create_account("a@b.hr", "123456").unwrap();
        backend.sign_out().unwrap();

        let err = backend.sign_in("a@b.hr", "nope12").unwrap_err();
        assert_eq!(err.code, AuthErrorCode::InvalidCredential);
        let err = backend.sign_in("who@b.hr", "123456").unwrap_err();
        assert_eq!(err.code, AuthErrorCode::InvalidCredential);

        let user = backend.sign_in("a@b.hr", "123456").unwrap();
        assert_eq!(backend.current_user(), Some(user));
    }

    #[test]
    fn test_auth_disabled() {
        let backend = EmulatorBackend::new(
            "demo-project",
            EmulatorConfig {
                auth_enabled: false,
                rules: RulesMode::Open,
            },
        )
        .unwrap();
        let err = backend.sign_in("a@b.hr", "123456").unwrap_err();
        assert_eq!(err.code, AuthErrorCode::ConfigurationNotFound);
    }

    #[test]
    fn test_signed_in_rules_deny_anonymous() {
        let backend = EmulatorBackend::new("demo-project", EmulatorConfig::default()).unwrap();
        let err = backend.fetch_all("messages").unwrap_err();
        assert_eq!(err.code, StoreErrorCode::PermissionDenied);

        backend.create_account("a@b.hr", "123456").unwrap();
        assert!(backend.fetch_all("messages").unwrap().is_empty());
    }

    #[test]
    fn test_insert_update_delete() {
        let backend = open_backend();
        let id = backend.insert("messages", new_message("hello")).unwrap();
        assert_eq!(id.len(), DOCUMENT_ID_LEN);

        backend
            .update("messages", &id, MessagePatch::text("edited"))
            .unwrap();
        let all = backend.fetch_all("messages").unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text, "edited");
        assert!(all[0].created_at.is_some());

        backend.delete("messages", &id).unwrap();
        assert!(backend.fetch_all("messages").unwrap().is_empty());
    }

    #[test]
    fn test_update_missing_document() {
        let backend = open_backend();
        let err = backend
            .update("messages", "missing", MessagePatch::text("x"))
            .unwrap_err();
        assert_eq!(err.code, StoreErrorCode::NotFound);
    }

    #[test]
    fn test_live_query_orders_and_skips_unstamped() {
        let backend = open_backend();
        let seen: Rc<RefCell<Vec<Vec<String>>>> = Rc::default();
        let sink = Rc::clone(&seen);

        backend.insert("messages", new_message("first")).unwrap();
        backend
            .insert(
                "messages",
                NewMessage {
                    created_at: TimestampField::Unset,
                    ..new_message("unstamped")
                },
            )
            .unwrap();

        let id = backend.subscribe(
            "messages",
            OrderBy::CreatedAt,
            Box::new(move |result| {
                let texts = result.unwrap().into_iter().map(|m| m.text).collect();
                sink.borrow_mut().push(texts);
            }),
        );
        backend.insert("messages", new_message("second")).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                vec!["first".to_string()],
                vec!["first".to_string(), "second".to_string()],
            ]
        );

        backend.unsubscribe(id);
        backend.insert("messages", new_message("third")).unwrap();
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(backend.live_query_count(), 0);
    }

    #[test]
    fn test_auth_listener_fires_on_change_only() {
        let backend = open_backend();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let id = backend.on_auth_state_changed(Box::new(move |_| counter.set(counter.get() + 1)));
        assert_eq!(calls.get(), 1);

        backend.create_account("a@b.hr", "123456").unwrap();
        assert_eq!(calls.get(), 2);
        // Same identity again: no change
        backend.sign_in("a@b.hr", "123456").unwrap();
        assert_eq!(calls.get(), 2);
        backend.sign_out().unwrap();
        assert_eq!(calls.get(), 3);

        backend.remove_auth_listener(id);
        backend.sign_in("a@b.hr", "123456").unwrap();
        assert_eq!(calls.get(), 3);
        assert_eq!(backend.auth_listener_count(), 0);
    }

    #[test]
    fn test_listener_may_reenter_backend() {
        let backend = Rc::new(open_backend());
        let inner = Rc::clone(&backend);
        let counts: Rc<RefCell<Vec<usize>>> = Rc::default();
        let sink = Rc::clone(&counts);

        backend.subscribe(
            "messages",
            OrderBy::CreatedAt,
            Box::new(move |_| {
                let n = inner.fetch_all("messages").unwrap().len();
                sink.borrow_mut().push(n);
            }),
        );
        backend.insert("messages", new_message("x")).unwrap();
        assert_eq!(*counts.borrow(), vec![0, 1]);
    }
}
