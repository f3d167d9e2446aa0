use extgate_types::UpdateInfo;

use super::{ResponseMeta, document, escape, indent};

pub const ROOT_ELEMENT: &str = "response";

/// Render an Omaha `<response>` listing `updates` in the given order.
pub fn encode<'a>(meta: &ResponseMeta, updates: impl IntoIterator<Item = &'a UpdateInfo>) -> String {
    let apps: Vec<String> = updates.into_iter().map(|u| indent(&app(u), 1)).collect();
    document(ROOT_ELEMENT, meta, &apps)
}

fn app(update: &UpdateInfo) -> String {
    let id = escape(&update.id);
    let codebase = escape(&update.codebase);
    let version = escape(&update.version);
    let package_name = escape(&update.package_name);
    let sha256 = escape(&update.sha256);

    format!(
        r#"<app appid="{id}">
    <updatecheck status="ok">
        <urls>
            <url codebase="{codebase}"></url>
        </urls>
        <manifest version="{version}">
            <packages>
                <package name="{package_name}" hash_sha256="{sha256}" required="true"></package>
            </packages>
        </manifest>
    </updatecheck>
</app>"#
    )
}
