//! Field maps for the profile and directory pages.
//!
//! Every value read from an agent row or from the request is passed through
//! [`escape_html`] here, except the two literal URL fields (privacy policy and
//! avatar) which are substituted as stored, falling back to a fixed default
//! when absent.

use super::{Fields, escape_html};
use crate::models::agent::Model as AgentModel;

pub const DEFAULT_PRIVACY_URL: &str = "#";
pub const DEFAULT_AVATAR_URL: &str = "https://via.placeholder.com/150";
pub const DEFAULT_ABOUT_ME: &str = "Contact me for more information.";

const NO_RESULTS_HTML: &str = r#"
                <div class="text-center py-12">
                    <div class="text-gray-300 text-5xl mb-4"><i class="fa-solid fa-magnifying-glass"></i></div>
                    <h3 class="text-xl font-medium text-slate-700">No agents found.</h3>
                    <p class="text-slate-500">Try adjusting your search terms.</p>
                </div>
            "#;

/// Fields for the profile/compliance template.
///
/// `slug` is the resolved request slug, which for a found agent equals its
/// `subdomain`.
pub fn profile_fields(agent: &AgentModel, slug: &str) -> Fields {
    let mut fields = Fields::new();
    fields.insert("BRAND_NAME", escape_html(&agent.brand_name));
    fields.insert("AGENT_NAME", escape_html(&agent.full_name()));
    fields.insert("PHONE", escape_html(&agent.phone_number));
    fields.insert("EMAIL", escape_html(&agent.email));
    fields.insert(
        "PRIVACY_URL",
        literal_url(agent.privacy_policy_url.as_deref(), DEFAULT_PRIVACY_URL),
    );
    fields.insert("AGENT_HANDLE", escape_html(slug));
    fields.insert(
        "ABOUT_ME",
        agent
            .about_me
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(escape_html)
            .unwrap_or_else(|| DEFAULT_ABOUT_ME.to_string()),
    );
    fields.insert("CITY", escape_optional(agent.city.as_deref()));
    fields.insert("STATE", escape_optional(agent.state.as_deref()));
    fields.insert("ZIP_CODE", escape_optional(agent.zip_code.as_deref()));
    fields.insert(
        "AVATAR_URL",
        literal_url(agent.avatar_url.as_deref(), DEFAULT_AVATAR_URL),
    );
    fields
}

/// Fields for the directory template.
pub fn directory_fields(query: &str, agents: &[AgentModel]) -> Fields {
    let escaped_query = escape_html(query);
    let results_header = if query.is_empty() {
        "All Agents".to_string()
    } else {
        format!("Search Results for \"{}\"", escaped_query)
    };

    let (cards, no_results) = if agents.is_empty() {
        (String::new(), NO_RESULTS_HTML.to_string())
    } else {
        (agents.iter().map(agent_card).collect(), String::new())
    };

    let mut fields = Fields::new();
    fields.insert("SEARCH_QUERY", escaped_query);
    fields.insert("RESULTS_HEADER", results_header);
    fields.insert("AGENT_CARDS", cards);
    fields.insert("NO_RESULTS", no_results);
    fields
}

/// One directory card linking to the agent's profile.
pub fn agent_card(agent: &AgentModel) -> String {
    let avatar = literal_url(agent.avatar_url.as_deref(), DEFAULT_AVATAR_URL);
    let first_name = escape_html(&agent.first_name);
    let full_name = escape_html(&agent.full_name());
    let brand = escape_html(&agent.brand_name);
    let city = escape_optional(agent.city.as_deref());
    let state = escape_optional(agent.state.as_deref());
    let zip = escape_optional(agent.zip_code.as_deref());
    let phone = escape_html(&agent.phone_number);
    let slug = escape_html(&agent.subdomain);

    format!(
        r#"
                <div class="bg-white rounded-xl shadow-sm border border-slate-100 overflow-hidden hover:shadow-md transition-shadow">
                    <div class="p-6">
                        <div class="flex items-center gap-4 mb-4">
                            <img src="{avatar}" alt="{first_name}" class="w-16 h-16 rounded-full object-cover">
                            <div>
                                <h3 class="font-bold text-lg text-slate-900">{full_name}</h3>
                                <p class="text-xs text-slate-500 uppercase tracking-wide">{brand}</p>
                            </div>
                        </div>
                        <div class="text-sm text-slate-600 mb-4 space-y-1">
                            <div class="flex items-center gap-2">
                                <i class="fa-solid fa-location-dot text-slate-400 w-4"></i>
                                <span>{city}, {state} {zip}</span>
                            </div>
                            <div class="flex items-center gap-2">
                                <i class="fa-solid fa-phone text-slate-400 w-4"></i>
                                <span>{phone}</span>
                            </div>
                        </div>
                        <a href="/meet/{slug}" class="block w-full text-center bg-slate-900 text-white py-2 rounded-lg text-sm font-medium hover:bg-black transition-colors">
                            View Profile
                        </a>
                    </div>
                </div>
            "#
    )
}

fn escape_optional(value: Option<&str>) -> String {
    value.map(escape_html).unwrap_or_default()
}

fn literal_url(value: Option<&str>, fallback: &str) -> String {
    value
        .filter(|url| !url.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
