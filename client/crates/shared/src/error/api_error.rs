//! API Error - Unified error type for every backend call
//!
//! Defines [`ApiError`] struct and [`ApiResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// 通信障害に割り当てる汎用ステータス
pub const NETWORK_ERROR_STATUS: u16 = 500;

/// 既定のエラーメッセージ（エラーボディに `detail` が無い場合）
pub const DEFAULT_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// クライアント統一エラー型
///
/// リクエストパイプラインが返す唯一のエラー形状です。
/// HTTP エラー応答と通信障害の両方をこの型で表現します。
///
/// ## Fields
/// * `status` - HTTP ステータスコード（通信障害の場合は汎用ステータス）
/// * `message` - ユーザー向けのエラーメッセージ
/// * `action` - ユーザーが取るべきアクション（オプション）
/// * `transport` - 通信レベルの障害かどうか
/// * `source` - 元のエラー（オプション、デバッグ用）
///
/// ## Examples
/// ```rust
/// use kernel::error::api_error::ApiError;
///
/// // バックエンドのエラー応答
/// let err = ApiError::new(400, "Invalid plan");
/// assert!(err.kind().is_validation());
///
/// // 通信障害
/// let err = ApiError::network("connection reset");
/// assert!(err.is_network());
/// ```
pub struct ApiError {
    /// HTTP ステータスコード
    status: u16,
    /// ユーザー向けメッセージ
    message: Cow<'static, str>,
    /// ユーザーが取るべきアクション
    action: Option<Cow<'static, str>>,
    /// 通信レベルの障害かどうか
    transport: bool,
    /// 元のエラー（デバッグ用）
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// クライアント結果型エイリアス
///
/// `Result<T, ApiError>` の省略形です。
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// ステータスとメッセージからエラーを作成
    ///
    /// ## Arguments
    /// * `status` - HTTP ステータスコード
    /// * `message` - ユーザー向けメッセージ
    #[inline]
    pub fn new(status: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            message: message.into(),
            action: None,
            transport: false,
            source: None,
        }
    }

    /// エラー種別からエラーを作成
    #[inline]
    pub fn from_kind(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(kind.status_code(), message)
    }

    /// 通信障害エラー
    ///
    /// 生の通信エラーを伝播させず、汎用ステータスで包みます。
    #[inline]
    pub fn network(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            transport: true,
            ..Self::new(NETWORK_ERROR_STATUS, message)
        }
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    /// 400 Bad Request エラー
    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_kind(ErrorKind::BadRequest, message)
    }

    /// 401 Unauthorized エラー
    #[inline]
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_kind(ErrorKind::Unauthorized, message)
    }

    /// 404 Not Found エラー
    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_kind(ErrorKind::NotFound, message)
    }

    /// 409 Conflict エラー
    #[inline]
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_kind(ErrorKind::Conflict, message)
    }

    /// 500 Internal Server Error
    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_kind(ErrorKind::InternalServerError, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// ユーザー向けアクションを設定
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::api_error::ApiError;
    /// let err = ApiError::unauthorized("Session expired")
    ///     .with_action("Please sign in again");
    /// assert_eq!(err.action(), Some("Please sign in again"));
    /// ```
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// 元のエラーを設定（デバッグ用）
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_status(self.status)
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// アクションを取得
    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// 通信障害かどうか
    #[inline]
    pub fn is_network(&self) -> bool {
        self.transport
    }

    /// 認証情報の失効（401）かどうか
    #[inline]
    pub fn is_auth_failure(&self) -> bool {
        !self.transport && self.kind().is_auth_failure()
    }

    /// サーバーエラーかどうか
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind().is_server_error()
    }

    /// クライアントエラーかどうか
    #[inline]
    pub fn is_client_error(&self) -> bool {
        !self.transport && self.kind().is_client_error()
    }
}

impl fmt::Debug for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("ApiError");
        builder.field("status", &self.status);
        builder.field("message", &self.message);
        if self.transport {
            builder.field("transport", &self.transport);
        }
        if let Some(action) = &self.action {
            builder.field("action", action);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.transport {
            write!(f, "[Network Error] {}", self.message)?;
        } else {
            write!(f, "[{} {}] {}", self.status, self.kind(), self.message)?;
        }
        if let Some(action) = &self.action {
            write!(f, " (Action: {})", action)?;
        }
        Ok(())
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

// ============================================================================
// Result extension traits
// ============================================================================

/// `Result<T, E>` を `ApiResult<T>` に変換するための拡張トレイト
pub trait ResultExt<T, E> {
    /// エラーを `ApiError` に変換し、指定した種別とメッセージでラップ
    fn map_api_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> ApiResult<T>
    where
        E: Error + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn map_api_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> ApiResult<T>
    where
        E: Error + Send + Sync + 'static,
    {
        self.map_err(|e| ApiError::from_kind(kind, message).with_source(e))
    }
}
