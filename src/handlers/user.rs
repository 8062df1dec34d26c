use axum::{
    extract::{Form, State},
    response::Html,
};
use minijinja::context;

use crate::{
    auth::{AdminUser, CurrentUser},
    error::{AppError, Result},
    models::{
        forms::NewUserForm,
        user::{Role, UserDto},
    },
    state::AppState,
    views,
};

/// Account list for the admin panel
pub async fn users_page(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Html<String>> {
    render_users(&state, &admin, String::new()).await
}

/// Create a seller account, reporting the outcome inline
pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Form(form): Form<NewUserForm>,
) -> Result<Html<String>> {
    let username = form.username.trim();

    let message = if username.is_empty() || form.password.is_empty() {
        "⚠️ Tous les champs sont requis.".to_string()
    } else {
        match state
            .users
            .create_user(username, &form.password, Role::Seller)
            .await
        {
            Ok(id) => {
                tracing::info!("User {} '{}' created by '{}'", id, username, admin.username());
                format!("✅ Utilisateur '{}' ajouté avec succès.", username)
            }
            Err(AppError::AlreadyExists(_)) => {
                format!("⚠️ Le nom d'utilisateur '{}' existe déjà.", username)
            }
            Err(e) => return Err(e),
        }
    };

    render_users(&state, &admin, message).await
}

async fn render_users(
    state: &AppState,
    admin: &CurrentUser,
    message: String,
) -> Result<Html<String>> {
    let users: Vec<UserDto> = state
        .users
        .get_all_users()
        .await?
        .into_iter()
        .map(UserDto::from)
        .collect();

    views::render_page(
        state,
        admin,
        "utilisateurs.html",
        context! {
            utilisateurs => users,
            message => message,
        },
    )
    .await
}
