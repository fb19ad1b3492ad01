//! Naming helpers for code generation
//!
//! All identifier casing used by the generator and the identifier deriver
//! lives here so generated files agree with each other.

/// Suffix appended to the module config class
pub const CONFIG_CLASS_SUFFIX: &str = "Config";

/// Naming helpers shared by the templates
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Convert a typed entity name to a class name (title case, whitespace removed)
    ///
    /// Only whitespace is dropped; underscores, dashes and digits stay where
    /// they are.
    ///
    /// # Examples
    ///
    /// ```
    /// # use drf_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_entity_name("post"), "Post");
    /// assert_eq!(TemplateHelpers::to_entity_name("  blog post "), "BlogPost");
    /// assert_eq!(TemplateHelpers::to_entity_name("blog_post"), "Blog_Post");
    /// ```
    #[must_use]
    pub fn to_entity_name(input: &str) -> String {
        Self::to_title_case(input.trim())
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    /// Title-case each word, where a word is a run of letters
    ///
    /// A letter is upper-cased when the character before it is not a letter
    /// and lower-cased otherwise, so `BlogPost` becomes `Blogpost` and
    /// `order-item` becomes `Order-Item`.
    #[must_use]
    pub fn to_title_case(input: &str) -> String {
        let mut after_letter = false;
        let mut titled = String::with_capacity(input.len());
        for c in input.chars() {
            if c.is_alphabetic() {
                if after_letter {
                    titled.extend(c.to_lowercase());
                } else {
                    titled.extend(c.to_uppercase());
                }
            } else {
                titled.push(c);
            }
            after_letter = c.is_alphabetic();
        }
        titled
    }

    /// Upper-case the first character and lower-case the rest
    ///
    /// # Examples
    ///
    /// ```
    /// # use drf_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::capitalize("blog"), "Blog");
    /// assert_eq!(TemplateHelpers::capitalize("myBlog"), "Myblog");
    /// ```
    #[must_use]
    pub fn capitalize(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
        })
    }

    /// Config class name for a module (`blog` -> `BlogConfig`)
    #[must_use]
    pub fn to_config_class_name(module_name: &str) -> String {
        format!("{}{CONFIG_CLASS_SUFFIX}", Self::capitalize(module_name))
    }

    /// Route segment for an entity (`BlogPost` -> `blogpost`)
    ///
    /// No pluralization is applied.
    #[must_use]
    pub fn to_route_segment(entity_name: &str) -> String {
        entity_name.to_lowercase()
    }

    /// Dotted import path from path segments (`["src", "blog"]` -> `src.blog`)
    #[must_use]
    pub fn to_import_path<S: AsRef<str>>(segments: &[S]) -> String {
        segments
            .iter()
            .map(AsRef::as_ref)
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }
}
