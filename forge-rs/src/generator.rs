//! Product text generation
//!
//! Static template stand-in for a real generation API. The sample copy is
//! in Arabic, matching the product's audience.

/// Render the generated product text for a type and idea
pub fn render(product_type: &str, idea: &str) -> String {
    format!(
        "📦 DigitalForge - Generated Product\n\
         نوع المنتج: {product_type}\n\
         الفكرة: {idea}\n\
         \n\
         مقدمة:\n\
         هذا منتج رقمي تم إنشاؤه تلقائيًا بواسطة DigitalForge. يمكنك تعديله وبيعه أو تحميله كملف PDF.\n\
         \n\
         محتوى (مثال):\n\
         1) نظرة عامة على الموضوع.\n\
         2) نقاط مهمة وممارسة عملية.\n\
         3) خاتمة ونصائح تطبيقية.\n\
         \n\
         (تم إنشاء النسخة التجريبية — استبدل هذه المحاكاة بربط API حقيقي لاحقًا)"
    )
}

/// Denial text returned when the free tier is used up
pub fn denial_message() -> &'static str {
    "🚫 انتهت تجربتك المجانية. يرجى الاشتراك للمتابعة."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_type_and_idea() {
        let text = render("ebook", "Learn Rust in 30 days");
        assert!(text.contains("نوع المنتج: ebook"));
        assert!(text.contains("الفكرة: Learn Rust in 30 days"));
        assert!(text.starts_with("📦 DigitalForge"));
    }

    #[test]
    fn test_denial_message_not_empty() {
        assert!(!denial_message().is_empty());
    }
}
