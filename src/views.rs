use axum::response::Html;
use minijinja::{Environment, Value, context};
use once_cell::sync::Lazy;

use crate::{auth::CurrentUser, error::Result, state::AppState};

const SOURCES: [(&str, &str); 9] = [
    ("base.html", include_str!("../templates/base.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("ajouter.html", include_str!("../templates/ajouter.html")),
    ("modifier_vente.html", include_str!("../templates/modifier_vente.html")),
    ("approvisionnement.html", include_str!("../templates/approvisionnement.html")),
    ("bilan.html", include_str!("../templates/bilan.html")),
    ("produits.html", include_str!("../templates/produits.html")),
    ("utilisateurs.html", include_str!("../templates/utilisateurs.html")),
];

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for (name, source) in SOURCES {
        // A broken template surfaces as TemplateNotFound when rendered
        if let Err(e) = env.add_template(name, source) {
            tracing::error!("Failed to load template {}: {}", name, e);
        }
    }
    env
});

/// Render a template with an explicit context
pub fn render(name: &str, ctx: Value) -> Result<Html<String>> {
    let html = TEMPLATES.get_template(name)?.render(ctx)?;
    Ok(Html(html))
}

/// Render a page for a logged-in user, draining their pending flash messages
pub async fn render_page(
    state: &AppState,
    user: &CurrentUser,
    name: &str,
    ctx: Value,
) -> Result<Html<String>> {
    let flashes = state.sessions.take_flashes(&user.token).await;
    render(
        name,
        context! {
            username => user.username(),
            is_admin => user.is_admin(),
            flashes => flashes,
            ..ctx
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_loads() {
        for (name, _) in SOURCES {
            assert!(TEMPLATES.get_template(name).is_ok(), "{} failed to load", name);
        }
    }

    #[test]
    fn login_page_shows_inline_error() {
        let Html(html) = render("login.html", context! { error => "Nom d'utilisateur ou mot de passe incorrect" })
            .unwrap();
        assert!(html.contains("mot de passe incorrect"));
        assert!(!html.contains("Déconnexion"));
    }
}
