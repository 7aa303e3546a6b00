//! Output formatting helpers.

use std::io::{self, Write};

use shodhan_client::types::{Blog, Category, Clinic, Disease, Service};
use shodhan_core::content::preprocess_description;
use shodhan_core::sanitize::{CharacterLevel, CharacterStatus};
use shodhan_core::service_kind::ServiceKind;

const SUMMARY_PREVIEW_CHARS: usize = 120;

fn preview(text: &str, limit: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{}...", head.trim_end())
    } else {
        head
    }
}

pub fn write_categories(w: &mut impl Write, categories: &[Category]) -> io::Result<()> {
    if categories.is_empty() {
        return writeln!(w, "No diseases found.");
    }
    for category in categories {
        writeln!(w, "{} ({})", category.name, category.diseases.len())?;
        for disease in &category.diseases {
            writeln!(w, "  {:>4}  {}", disease.id, disease.name)?;
        }
    }
    Ok(())
}

pub fn write_disease_detail(w: &mut impl Write, disease: &Disease) -> io::Result<()> {
    writeln!(w, "{}", disease.name)?;
    if let Some(category) = &disease.category {
        writeln!(w, "  Category: {}", category.name)?;
    }
    if let Some(description) = &disease.description {
        writeln!(w, "\n{}", preprocess_description(description))?;
    }
    let sections = [
        ("Symptoms", &disease.symptoms, "Symptoms data not available."),
        ("Treatment", &disease.treatment, "Treatment details coming soon."),
        ("Causes", &disease.causes, "Causes data not available."),
    ];
    for (title, body, fallback) in sections {
        writeln!(w, "\n## {title}")?;
        writeln!(
            w,
            "{}",
            body.as_deref().filter(|b| !b.trim().is_empty()).unwrap_or(fallback)
        )?;
    }

    let faqs = disease.faq_entries();
    if !faqs.is_empty() {
        writeln!(w, "\n## Frequently Asked Questions")?;
        for (i, faq) in faqs.iter().enumerate() {
            if faq.question.is_empty() {
                writeln!(w, "{}", faq.answer)?;
            } else {
                writeln!(w, "Q{}: {}", i + 1, faq.question)?;
                writeln!(w, "    {}", faq.answer)?;
            }
        }
    }
    Ok(())
}

pub fn write_services(w: &mut impl Write, services: &[Service]) -> io::Result<()> {
    if services.is_empty() {
        return writeln!(w, "No services available.");
    }
    for service in services {
        let action = ServiceKind::from_service_name(&service.name)
            .map(|kind| format!("  [shodhan book {kind}]"))
            .unwrap_or_default();
        writeln!(w, "{:>4}  {}{action}", service.id, service.name)?;
    }
    Ok(())
}

pub fn write_service_detail(w: &mut impl Write, service: &Service) -> io::Result<()> {
    writeln!(w, "{}", service.name)?;
    if let Some(description) = &service.description {
        writeln!(w, "\n{}", preprocess_description(description))?;
    }
    if let Some(kind) = ServiceKind::from_service_name(&service.name) {
        writeln!(
            w,
            "\n{}: shodhan book {kind}",
            kind.profile().title
        )?;
    }
    Ok(())
}

pub fn write_clinics(w: &mut impl Write, clinics: &[Clinic]) -> io::Result<()> {
    if clinics.is_empty() {
        return writeln!(w, "No clinics found.");
    }
    for clinic in clinics {
        writeln!(w, "{}", clinic.name)?;
        if let Some(address) = &clinic.address {
            writeln!(w, "  Address: {address}")?;
        }
        if let Some(city) = &clinic.city {
            writeln!(w, "  City:    {city}")?;
        }
        if let Some(phone) = &clinic.phone {
            writeln!(w, "  Phone:   {phone}")?;
        }
        if !clinic.image_urls.is_empty() {
            writeln!(w, "  Photos:  {}", clinic.image_urls.len())?;
        }
    }
    Ok(())
}

pub fn write_blog_list(w: &mut impl Write, blogs: &[Blog], show_status: bool) -> io::Result<()> {
    if blogs.is_empty() {
        return writeln!(w, "No blog posts found.");
    }
    for blog in blogs {
        let id = blog.id.map(|id| id.to_string()).unwrap_or_default();
        let mut flags = Vec::new();
        if show_status {
            flags.push(if blog.published { "published" } else { "draft" });
        }
        if blog.featured {
            flags.push("featured");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        writeln!(w, "{id:>4}  {}{flags}", blog.title)?;
        writeln!(w, "      /blogs/{}  by {}", blog.slug, blog.author)?;
        if let Some(summary) = blog.summary.as_deref().filter(|s| !s.is_empty()) {
            writeln!(w, "      {}", preview(summary, SUMMARY_PREVIEW_CHARS))?;
        }
    }
    Ok(())
}

pub fn write_blog_detail(w: &mut impl Write, blog: &Blog) -> io::Result<()> {
    writeln!(w, "{}", blog.title)?;
    writeln!(w, "  By:      {}", blog.author)?;
    if let Some(created) = &blog.created_at {
        writeln!(w, "  Posted:  {created}")?;
    }
    if let Some(tags) = &blog.tags {
        let tags = tags.joined();
        if !tags.is_empty() {
            writeln!(w, "  Tags:    {tags}")?;
        }
    }
    if let Some(url) = &blog.image_url {
        writeln!(w, "  Image:   {url}")?;
    }
    writeln!(w, "\n{}", blog.content)?;
    Ok(())
}

pub fn write_character_status(
    w: &mut impl Write,
    field: &str,
    status: &CharacterStatus,
) -> io::Result<()> {
    let marker = match status.level {
        CharacterLevel::Success => "",
        CharacterLevel::Warning => "  (approaching limit)",
        CharacterLevel::Danger => "  (over limit)",
    };
    writeln!(
        w,
        "  {field:<9} {}/{}{marker}",
        status.length, status.limit
    )
}

pub fn write_home(w: &mut impl Write, featured: &[Blog]) -> io::Result<()> {
    writeln!(w, "🌿 Shodhan Ayurveda")?;
    writeln!(
        w,
        "Experience authentic Ayurvedic healing with personalized consultations"
    )?;
    writeln!(
        w,
        "and transformative therapies designed for your unique constitution.\n"
    )?;
    writeln!(w, "  Start your journey:  shodhan promo show")?;
    writeln!(w, "  Explore treatments:  shodhan open /diseases")?;
    writeln!(w, "  Read our blogs:      shodhan open /blogs")?;
    if !featured.is_empty() {
        writeln!(w, "\nFeatured articles")?;
        for blog in featured {
            writeln!(w, "  {}  (/blogs/{})", blog.title, blog.slug)?;
        }
    }
    Ok(())
}

pub fn write_promo(w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "🌿 Welcome to Shodhan Ayurveda! ✨")?;
    writeln!(w, "Start Your Healing Journey Today\n")?;
    writeln!(w, "📞 Call Consultation")?;
    writeln!(
        w,
        "   Get instant expert advice from our Ayurvedic doctors."
    )?;
    writeln!(
        w,
        "   Request a call:  shodhan book {}",
        ServiceKind::CallConsultation
    )?;
    writeln!(w, "🧘‍♀️ Panchakarma Therapy")?;
    writeln!(
        w,
        "   The ultimate Ayurvedic detoxification and rejuvenation therapy."
    )?;
    writeln!(w, "   Learn more:      shodhan open /services/1")?;
    writeln!(w, "\nContinue browsing: shodhan promo dismiss")?;
    Ok(())
}

pub fn write_not_found(w: &mut impl Write, path: &str) -> io::Result<()> {
    writeln!(w, "Page Not Found")?;
    writeln!(w, "The URL {path} could not be found on this server.")?;
    writeln!(w, "  Go home:          shodhan open /")?;
    writeln!(w, "  Browse diseases:  shodhan open /diseases")?;
    writeln!(w, "  Find a clinic:    shodhan open /clinics")?;
    Ok(())
}
