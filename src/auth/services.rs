use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        jwt::{JwtKeys, TokenPair},
        password::{hash_password, meets_policy, verify_password},
        repo::UserStore,
        repo_types::{NewUser, User},
    },
    db::StoreError,
    error::AppError,
    policy::{authorize, Actor, Operation, Resource},
    state::AppState,
};

pub const MAX_USERNAME_LEN: usize = 25;
pub const MAX_EMAIL_LEN: usize = 80;

const WEAK_PASSWORD: &str = "La contraseña debe tener al menos 8 caracteres y contener \
     mayúsculas, minúsculas, números y alguno de estos caracteres [_@$], sin espacios";
const DUPLICATE_EMAIL: &str = "El email ya está registrado, intenta con uno nuevo";
const DUPLICATE_USERNAME: &str = "El nombre de usuario ya está registrado, intenta con uno nuevo";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    email.len() <= MAX_EMAIL_LEN && EMAIL_RE.is_match(email)
}

/// Subject of a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

/// Registration input as received from the client.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_active: bool,
    pub is_admin: bool,
}

#[instrument(skip(state, reg), fields(username = %reg.username))]
pub async fn register(state: &AppState, reg: Registration) -> Result<User, AppError> {
    if reg.is_admin && !state.config.allow_admin_registration {
        warn!("admin self-registration refused");
        return Err(AppError::validation(
            "El registro de administradores está deshabilitado",
        ));
    }
    let user = create_account(state.users.as_ref(), reg).await?;
    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Validate, check for collisions, hash and insert.
async fn create_account(users: &dyn UserStore, reg: Registration) -> Result<User, AppError> {
    let username = reg.username.trim().to_string();
    let email = reg.email.trim().to_lowercase();

    let name_len = username.chars().count();
    if name_len == 0 || name_len > MAX_USERNAME_LEN {
        return Err(AppError::validation(format!(
            "El nombre de usuario debe tener entre 1 y {MAX_USERNAME_LEN} caracteres"
        )));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::validation("Email inválido"));
    }
    if !meets_policy(&reg.password) {
        warn!("weak password");
        return Err(AppError::validation(WEAK_PASSWORD));
    }

    if users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Duplicate(DUPLICATE_EMAIL.into()));
    }
    if users.find_by_username(&username).await?.is_some() {
        warn!(username = %username, "username already registered");
        return Err(AppError::Duplicate(DUPLICATE_USERNAME.into()));
    }

    let password_hash = hash_password(&reg.password)?;
    let created = users
        .create(NewUser {
            username,
            email,
            password_hash,
            is_active: reg.is_active,
            is_admin: reg.is_admin,
        })
        .await;

    let e = match created {
        Ok(user) => return Ok(user),
        Err(e) => e,
    };
    // Lost a race against a concurrent registration.
    let duplicate = e
        .downcast_ref::<StoreError>()
        .map(|StoreError::UniqueViolation { constraint }| {
            if constraint.contains("email") {
                DUPLICATE_EMAIL
            } else {
                DUPLICATE_USERNAME
            }
        });
    match duplicate {
        Some(msg) => Err(AppError::Duplicate(msg.into())),
        None => Err(AppError::Internal(e)),
    }
}

/// Create the configured administrator unless the username is taken.
/// Returns `true` when an account was created.
pub async fn ensure_admin(
    users: &dyn UserStore,
    username: &str,
    email: &str,
    password: &str,
) -> Result<bool, AppError> {
    let username = username.trim();
    if let Some(existing) = users.find_by_username(username).await? {
        if !existing.is_admin {
            warn!(username = %existing.username, "seed username belongs to a non-admin account");
        }
        return Ok(false);
    }
    let user = create_account(
        users,
        Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            is_active: true,
            is_admin: true,
        },
    )
    .await?;
    info!(user_id = %user.id, username = %user.username, "admin account seeded");
    Ok(true)
}

#[instrument(skip(state, password))]
pub async fn login(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<TokenPair, AppError> {
    let Some(user) = state.users.find_by_username(username.trim()).await? else {
        warn!("login unknown username");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let pair = state.keys.issue_pair(&user.username)?;
    info!(user_id = %user.id, "user logged in");
    Ok(pair)
}

/// Exchange a refresh token for a new pair bound to the same subject.
pub fn refresh(keys: &JwtKeys, token: Option<&str>) -> Result<TokenPair, AppError> {
    let token = token.ok_or_else(|| {
        AppError::invalid_token("Por favor asegúrate de contar con un refresh token")
    })?;
    let claims = keys.verify_refresh(token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        AppError::invalid_token(format!(
            "Por favor asegúrate de contar con un refresh token: {e}"
        ))
    })?;
    Ok(keys.issue_pair(&claims.sub)?)
}

/// Verify an access token and return its subject.
pub fn authenticate(keys: &JwtKeys, token: Option<&str>) -> Result<Identity, AppError> {
    let token =
        token.ok_or_else(|| AppError::invalid_token("Token inválido o token no proporcionado"))?;
    let claims = keys.verify_access(token).map_err(|e| {
        warn!(error = %e, "access token rejected");
        AppError::invalid_token("Token inválido o token no proporcionado")
    })?;
    Ok(Identity {
        username: claims.sub,
    })
}

/// Authenticate and load the acting user from the store.
pub async fn resolve_actor(state: &AppState, token: Option<&str>) -> Result<Actor, AppError> {
    let identity = authenticate(&state.keys, token)?;
    let user = state
        .users
        .find_by_username(&identity.username)
        .await?
        .ok_or_else(|| {
            warn!(username = %identity.username, "token subject no longer exists");
            AppError::invalid_token("El usuario del token no existe")
        })?;
    Ok(Actor {
        id: user.id,
        username: user.username,
        is_admin: user.is_admin,
    })
}

pub async fn list_users(state: &AppState, actor: &Actor) -> Result<Vec<User>, AppError> {
    authorize(actor, &Resource::Collection, Operation::ListUsers)?;
    Ok(state.users.list().await?)
}
