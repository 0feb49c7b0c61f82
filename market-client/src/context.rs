//! Application context
//!
//! Built once at startup from [`ClientConfig`]. Owns the session and the
//! HTTP transport, and hands out workflow instances that share them.

use shared::UserInfo;

use crate::credential::CredentialStorage;
use crate::flow::{
    BookingHistory, BookingIntake, HistoryScope, PaymentInitiation, PaymentReturnReconciler,
    ReviewSubmission,
};
use crate::http::HttpClient;
use crate::session::Session;
use crate::{ClientConfig, ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct AppContext {
    config: ClientConfig,
    session: Session,
    http: HttpClient,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let session = match &config.credential_path {
            Some(path) => Session::with_storage(CredentialStorage::new(path)),
            None => Session::new(),
        };
        let http = HttpClient::new(&config, session.clone())?;

        tracing::debug!(
            base_url = %http.base_url(),
            timeout_secs = config.timeout,
            logged_in = session.is_logged_in(),
            "Application context ready"
        );

        Ok(Self {
            config,
            session,
            http,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Option<UserInfo> {
        self.session.user()
    }

    /// Logged-in user, or [`ClientError::Unauthorized`]
    pub fn require_user(&self) -> ClientResult<UserInfo> {
        self.session.user().ok_or(ClientError::Unauthorized)
    }

    pub fn payments(&self) -> PaymentInitiation {
        PaymentInitiation::new(self.http.clone(), self.config.retry)
    }

    pub fn booking_intake(&self) -> BookingIntake {
        BookingIntake::new(self.http.clone(), self.payments())
    }

    pub fn reconciler(&self) -> PaymentReturnReconciler {
        PaymentReturnReconciler::new(self.http.clone(), self.config.retry)
    }

    /// History for the logged-in user
    pub fn history(&self) -> ClientResult<BookingHistory> {
        let scope = HistoryScope::for_user(&self.require_user()?);
        Ok(self.history_for(scope))
    }

    pub fn history_for(&self, scope: HistoryScope) -> BookingHistory {
        BookingHistory::new(self.http.clone(), self.payments(), scope)
    }

    pub fn reviews(&self) -> ReviewSubmission {
        ReviewSubmission::new(self.http.clone())
    }
}
