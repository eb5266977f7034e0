//! sitemap.xml and robots.txt builders

use mpc_common::db::{Brand, Mobile};

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn push_url(out: &mut String, loc: &str, lastmod: Option<String>, changefreq: &str, priority: &str) {
    out.push_str("  <url>\n");
    out.push_str(&format!("    <loc>{}</loc>\n", xml_escape(loc)));
    if let Some(lastmod) = lastmod {
        out.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
    }
    out.push_str(&format!("    <changefreq>{}</changefreq>\n", changefreq));
    out.push_str(&format!("    <priority>{}</priority>\n", priority));
    out.push_str("  </url>\n");
}

/// Sitemap of the home page, brand index, visible brands and every mobile
///
/// Hidden brands are left out; their mobiles still appear.
pub fn sitemap_xml(site_url: &str, brands: &[Brand], mobiles: &[Mobile]) -> String {
    let base = site_url.trim_end_matches('/');
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    push_url(&mut out, &format!("{}/", base), None, "daily", "1.0");
    push_url(&mut out, &format!("{}/brands", base), None, "weekly", "0.8");

    for brand in brands.iter().filter(|b| b.is_visible) {
        push_url(
            &mut out,
            &format!("{}/brand/{}", base, brand.slug),
            None,
            "weekly",
            "0.7",
        );
    }

    for mobile in mobiles {
        push_url(
            &mut out,
            &format!("{}/mobile/{}/{}", base, mobile.brand, mobile.slug),
            Some(mobile.created_at.format("%Y-%m-%d").to_string()),
            "monthly",
            "0.6",
        );
    }

    out.push_str("</urlset>\n");
    out
}

pub fn robots_txt(site_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /admin\nDisallow: /api/admin\nDisallow: /api/export\n\nSitemap: {}/sitemap.xml\n",
        site_url.trim_end_matches('/')
    )
}
