// SPDX-License-Identifier: Apache-2.0

//! Blog feature module.
//!
//! Installing the blog writes `blog: true` into the modules section and
//! scaffolds the content directory: `content/blog/` with seed
//! `authors.json` and `categories.json` files, a root `content.config.ts`
//! shim, and optionally a welcome article. The module also offers an
//! interactive article generator for projects where the blog is already
//! installed. Removal only deletes the `content.config.ts` shim; articles
//! and the JSON seed files are user content and stay untouched.

use crate::domain::{ConfigError, ModuleManifest, ModuleName, ModuleValue, Result};
use crate::ports::{FeatureModule, Prompter};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONTENT_CONFIG: &str = "content.config.ts";
const BLOG_DIR: &str = "content/blog";
const BLOG_IMPORT: &str = "./modules/blog/content.config";

#[derive(Clone, Debug, Deserialize)]
struct Author {
    id: String,
    name: String,
    #[serde(default)]
    avatar: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct Category {
    id: String,
    name: String,
}

/// The blog feature: markdown articles under `content/blog/`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlogModule;

impl BlogModule {
    /// Creates the blog module descriptor.
    pub fn new() -> Self {
        BlogModule
    }

    /// Interactively creates a new article under `content/blog/`.
    ///
    /// Prompts for title, description, author, and category, then writes a
    /// markdown file named after the slugified title. Returns the path of
    /// the created file, or `None` when the user backs out (empty title,
    /// invalid selection).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ScaffoldError`] when an article with the same
    /// slug already exists, or an I/O error.
    pub fn create_article(
        &self,
        project_root: &Path,
        prompter: &mut dyn Prompter,
    ) -> Result<Option<PathBuf>> {
        let title = prompter.input("Article title: ")?;
        if title.is_empty() {
            warn!("article title cannot be empty");
            return Ok(None);
        }
        let description = prompter.input("Short description: ")?;

        let authors = load_authors(project_root);
        let author_names: Vec<String> = authors.iter().map(|a| a.name.clone()).collect();
        let author = match prompter.select("Select the author", &author_names)? {
            Some(index) => &authors[index],
            None => {
                warn!("invalid author selection");
                return Ok(None);
            }
        };

        let categories = load_categories(project_root);
        let category_names: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
        let category = match prompter.select("Select the category", &category_names)? {
            Some(index) => &categories[index],
            None => {
                warn!("invalid category selection");
                return Ok(None);
            }
        };

        let slug = slugify(&title);
        let path = project_root.join(BLOG_DIR).join(format!("{}.md", slug));
        if path.exists() {
            return Err(ConfigError::ScaffoldError {
                message: format!("an article with the slug '{}' already exists", slug),
            });
        }

        fs::create_dir_all(project_root.join(BLOG_DIR))?;
        fs::write(&path, article_content(&title, &description, author, category))?;
        info!(article = %path.display(), "article created");
        Ok(Some(path))
    }
}

impl FeatureModule for BlogModule {
    fn name(&self) -> ModuleName {
        ModuleName::new_unchecked("blog")
    }

    fn summary(&self) -> &str {
        "Markdown blog with authors and categories under content/blog/"
    }

    fn manifest(&self) -> ModuleManifest {
        ModuleManifest::new(self.name())
    }

    fn default_config(&self) -> ModuleValue {
        ModuleValue::Bool(true)
    }

    fn is_scaffolded(&self, project_root: &Path) -> bool {
        project_root.join(BLOG_DIR).is_dir()
    }

    fn scaffold(&self, project_root: &Path, prompter: &mut dyn Prompter) -> Result<()> {
        let blog_dir = project_root.join(BLOG_DIR);
        if !blog_dir.exists() {
            fs::create_dir_all(&blog_dir)?;
            if prompter.confirm("Seed content/blog with a welcome article?")? {
                fs::write(blog_dir.join("welcome-to-your-blog.md"), welcome_article())?;
            }
        }

        let authors_path = blog_dir.join("authors.json");
        if !authors_path.exists() {
            fs::write(&authors_path, to_pretty(&default_authors())?)?;
        }

        let categories_path = blog_dir.join("categories.json");
        if !categories_path.exists() {
            fs::write(&categories_path, to_pretty(&default_categories())?)?;
        }

        write_content_config(project_root)?;
        info!("blog scaffolding complete");
        Ok(())
    }

    fn teardown(&self, project_root: &Path) -> Result<()> {
        // Only the shim is module-owned; articles and seed files stay.
        let shim = project_root.join(CONTENT_CONFIG);
        if shim.exists() {
            fs::remove_file(&shim)?;
            info!("removed content.config.ts");
        }
        Ok(())
    }
}

/// Writes the root `content.config.ts` shim, or rewrites an existing one
/// that does not import the blog collection config.
fn write_content_config(project_root: &Path) -> Result<()> {
    let path = project_root.join(CONTENT_CONFIG);
    if !path.exists() {
        let shim = format!(
            "import {{ defineContentConfig }} from '@nuxt/content'\n\n\
             import {{ contentConfig }} from '{}'\n\
             export default defineContentConfig(contentConfig)\n",
            BLOG_IMPORT
        );
        fs::write(&path, shim)?;
        return Ok(());
    }

    let existing = fs::read_to_string(&path)?;
    if !existing.contains(BLOG_IMPORT) {
        let rewritten = format!(
            "import {{ defineContentConfig }} from '@nuxt/content'\n\n\
             import blogConfig from '{}'\n\n\
             export default defineContentConfig({{\n  ...blogConfig\n}})\n",
            BLOG_IMPORT
        );
        fs::write(&path, rewritten)?;
    }
    Ok(())
}

fn load_authors(project_root: &Path) -> Vec<Author> {
    read_seed(project_root, "authors.json").unwrap_or_else(|| {
        vec![Author {
            id: "admin".to_string(),
            name: "Administrator".to_string(),
            avatar: Some("/avatars/admin.jpg".to_string()),
        }]
    })
}

fn load_categories(project_root: &Path) -> Vec<Category> {
    read_seed(project_root, "categories.json").unwrap_or_else(|| {
        vec![
            Category {
                id: "general".to_string(),
                name: "General".to_string(),
            },
            Category {
                id: "tutorial".to_string(),
                name: "Tutorial".to_string(),
            },
        ]
    })
}

/// Reads a JSON seed file from `content/blog/`; any problem falls back to
/// the built-in defaults.
fn read_seed<T: serde::de::DeserializeOwned>(project_root: &Path, file: &str) -> Option<Vec<T>> {
    let path = project_root.join(BLOG_DIR).join(file);
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(items) => Some(items),
        Err(error) => {
            warn!(%file, %error, "unreadable seed file, using defaults");
            None
        }
    }
}

fn default_authors() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "team",
            "name": "The Team",
            "bio": "The team behind this project.",
            "avatar": "/avatars/team.jpg",
            "social": {}
        },
        {
            "id": "admin",
            "name": "Administrator",
            "bio": "Blog administrator.",
            "avatar": "/avatars/admin.jpg",
            "social": {}
        }
    ])
}

fn default_categories() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "tutorial",
            "name": "Tutorial",
            "description": "Step-by-step guides and tutorials",
            "color": "#3B82F6"
        },
        {
            "id": "development",
            "name": "Development",
            "description": "Articles about web development",
            "color": "#10B981"
        },
        {
            "id": "news",
            "name": "News",
            "description": "Latest news and updates",
            "color": "#F59E0B"
        },
        {
            "id": "welcome",
            "name": "Welcome",
            "description": "Introductory articles",
            "color": "#8B5CF6"
        }
    ])
}

fn to_pretty(value: &serde_json::Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|error| ConfigError::ScaffoldError {
        message: error.to_string(),
    })
}

/// Turns a title into a file slug: lowercase, accents folded, punctuation
/// dropped, spaces collapsed into single hyphens.
fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.to_lowercase().chars() {
        let folded = fold_accent(c);
        if folded.is_ascii_alphanumeric() {
            slug.push(folded);
        } else if folded == ' ' || folded == '-' {
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

fn article_content(title: &str, description: &str, author: &Author, category: &Category) -> String {
    let date = chrono::Local::now().format("%Y-%m-%d");
    let description = if description.is_empty() {
        "Article description"
    } else {
        description
    };
    let avatar = author
        .avatar
        .as_deref()
        .map(|a| format!("\n  avatar: \"{}\"", a))
        .unwrap_or_default();

    format!(
        "---\n\
         title: \"{title}\"\n\
         description: \"{description}\"\n\
         publishedAt: \"{date}\"\n\
         author:\n\
         \x20 name: \"{author_name}\"{avatar}\n\
         \x20 slug: \"{author_id}\"\n\
         categories:\n\
         \x20 - slug: \"{category_id}\"\n\
         \x20   title: \"{category_name}\"\n\
         image:\n\
         \x20 src: \"https://picsum.photos/800/400\"\n\
         \x20 alt: \"{title}\"\n\
         ---\n\n\
         # {title}\n\n\
         {description}\n\n\
         ## Introduction\n\n\
         Write your introduction here...\n\n\
         ## Conclusion\n\n\
         Wrap up your article here...\n",
        title = title,
        description = description,
        date = date,
        author_name = author.name,
        avatar = avatar,
        author_id = author.id,
        category_id = category.id,
        category_name = category.name,
    )
}

fn welcome_article() -> String {
    let date = chrono::Local::now().format("%Y-%m-%d");
    format!(
        "---\n\
         title: \"Welcome to your blog\"\n\
         description: \"Your first article is ready. Learn how to customize it and create content.\"\n\
         publishedAt: \"{date}\"\n\
         author:\n\
         \x20 slug: \"team\"\n\
         categories:\n\
         \x20 - slug: \"welcome\"\n\
         \x20   title: \"Welcome\"\n\
         image:\n\
         \x20 src: \"https://picsum.photos/800/400\"\n\
         \x20 alt: \"Welcome to your blog\"\n\
         ---\n\n\
         # Welcome to your blog!\n\n\
         The blog module is installed. This is your first sample article.\n\n\
         ## What now?\n\n\
         - Create new articles under `content/blog/`\n\
         - Add authors in `content/blog/authors.json`\n\
         - Add categories in `content/blog/categories.json`\n",
        date = date
    )
}
