use extgate_types::UpdateInfo;

use super::{ResponseMeta, document, escape, indent};

pub const ROOT_ELEMENT: &str = "gupdate";

/// Render a legacy `<gupdate>` document listing `updates` in the given order.
pub fn encode<'a>(meta: &ResponseMeta, updates: impl IntoIterator<Item = &'a UpdateInfo>) -> String {
    let apps: Vec<String> = updates.into_iter().map(|u| indent(&app(u), 1)).collect();
    document(ROOT_ELEMENT, meta, &apps)
}

fn app(update: &UpdateInfo) -> String {
    format!(
        r#"<app appid="{}" status="ok">
    <updatecheck status="ok" codebase="{}" version="{}" hash_sha256="{}"></updatecheck>
</app>"#,
        escape(&update.id),
        escape(&update.codebase),
        escape(&update.version),
        escape(&update.sha256),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response() {
        assert_eq!(
            encode(&ResponseMeta::default(), []),
            r#"<gupdate protocol="3.1" server="prod"></gupdate>"#
        );
    }

    #[test]
    fn test_two_apps_are_byte_exact() {
        let light = UpdateInfo {
            id: "ldimlcelhnjgpjjemdjokpgeeikdinbm".to_string(),
            version: "1.0.0".to_string(),
            codebase: "https://brave-core-ext.s3.brave.com/release/ldimlcelhnjgpjjemdjokpgeeikdinbm/extension_1_0_0.crx".to_string(),
            package_name: "extension_1_0_0.crx".to_string(),
            sha256: "1c714fadd4208c63f74b707e4c12b81b3ad0153c37de1348fa810dd47cfc5618".to_string(),
        };
        let dark = UpdateInfo {
            id: "bfdgpgibhagkpdlnjonhkabjoijopoge".to_string(),
            version: "1.0.0".to_string(),
            codebase: "https://brave-core-ext.s3.brave.com/release/bfdgpgibhagkpdlnjonhkabjoijopoge/extension_1_0_0.crx".to_string(),
            package_name: "extension_1_0_0.crx".to_string(),
            sha256: "ae517d6273a4fc126961cb026e02946db4f9dbb58e3d9bc29f5e1270e3ce9834".to_string(),
        };

        let expected = r#"<gupdate protocol="3.1" server="prod">
    <app appid="ldimlcelhnjgpjjemdjokpgeeikdinbm" status="ok">
        <updatecheck status="ok" codebase="https://brave-core-ext.s3.brave.com/release/ldimlcelhnjgpjjemdjokpgeeikdinbm/extension_1_0_0.crx" version="1.0.0" hash_sha256="1c714fadd4208c63f74b707e4c12b81b3ad0153c37de1348fa810dd47cfc5618"></updatecheck>
    </app>
    <app appid="bfdgpgibhagkpdlnjonhkabjoijopoge" status="ok">
        <updatecheck status="ok" codebase="https://brave-core-ext.s3.brave.com/release/bfdgpgibhagkpdlnjonhkabjoijopoge/extension_1_0_0.crx" version="1.0.0" hash_sha256="ae517d6273a4fc126961cb026e02946db4f9dbb58e3d9bc29f5e1270e3ce9834"></updatecheck>
    </app>
</gupdate>"#;

        assert_eq!(encode(&ResponseMeta::default(), [&light, &dark]), expected);
    }
}
