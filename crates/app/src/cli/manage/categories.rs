use clap::{Args, Subcommand};

use boxoffice::{
    catalog::CategoryId,
    forms::{CategoryForm, Form},
    summary,
};
use boxoffice_app::context::AppContext;

use crate::cli::{invalid, print_with, read_failed, write_failed};

#[derive(Debug, Args)]
pub(crate) struct CategoriesCommand {
    #[command(subcommand)]
    command: CategoriesSubcommand,
}

#[derive(Debug, Subcommand)]
enum CategoriesSubcommand {
    /// List categories
    List,
    /// Create a category
    Create(CategoryArgs),
    /// Edit a category; omitted fields keep their value
    Update {
        /// Category id
        id: u64,
        #[command(flatten)]
        fields: CategoryArgs,
    },
    /// Delete a category
    Delete {
        /// Category id
        id: u64,
    },
}

#[derive(Debug, Args)]
struct CategoryArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,
}

impl CategoryArgs {
    fn apply(self, form: &mut CategoryForm) {
        if let Some(name) = self.name {
            form.name = name;
        }

        if let Some(description) = self.description {
            form.description = description;
        }
    }
}

pub(crate) async fn run(ctx: &AppContext, command: CategoriesCommand) -> Result<(), String> {
    match command.command {
        CategoriesSubcommand::List => {
            let categories = ctx
                .categories
                .list_categories()
                .await
                .map_err(|error| read_failed("categories", &error))?;

            print_with(|out| summary::write_categories(out, &categories))
        }
        CategoriesSubcommand::Create(fields) => {
            let mut form = CategoryForm::default();

            fields.apply(&mut form);

            let draft = form.submit().map_err(|errors| invalid(&errors))?;

            let category = ctx
                .categories
                .create_category(draft)
                .await
                .map_err(|error| write_failed("create category", &error))?;

            println!("created category {} ({})", category.id, category.name);

            Ok(())
        }
        CategoriesSubcommand::Update { id, fields } => {
            let category = ctx
                .categories
                .get_category(CategoryId::new(id))
                .await
                .map_err(|error| read_failed("category", &error))?;

            let mut form = CategoryForm::from(&category);

            fields.apply(&mut form);

            let draft = form.submit().map_err(|errors| invalid(&errors))?;

            let category = ctx
                .categories
                .update_category(category.id, draft)
                .await
                .map_err(|error| write_failed("update category", &error))?;

            println!("updated category {} ({})", category.id, category.name);

            Ok(())
        }
        CategoriesSubcommand::Delete { id } => {
            ctx.categories
                .delete_category(CategoryId::new(id))
                .await
                .map_err(|error| write_failed("delete category", &error))?;

            println!("deleted category {id}");

            Ok(())
        }
    }
}
