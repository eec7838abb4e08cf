use crate::model::NewArticle;
use crate::services::articles::ArticleService;
use crate::services::ServiceError;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub existing: usize,
    /// Number of articles in the database once seeded
    pub total: i64,
}

pub fn sample_articles() -> Vec<NewArticle> {
    vec![
        NewArticle {
            title: "Writing a REST API in Rust".to_owned(),
            content: "actix-web and sqlx go a long way when building a small JSON API. This \
                      article walks through the routes, the persistence layer and the error \
                      handling of a tiny blog backend."
                .to_owned(),
            author: "Backend Developer".to_owned(),
            is_published: false,
        },
        NewArticle {
            title: "Building a Blog API".to_owned(),
            content: "A blog API is a nice playground for REST principles: articles can be \
                      listed, created, read, updated and deleted, with validation on every \
                      write."
                .to_owned(),
            author: "API Expert".to_owned(),
            is_published: false,
        },
        NewArticle {
            title: "Best Practices for API Development".to_owned(),
            content: "Validate every input, return structured errors, log what happens and keep \
                      the contract of each endpoint small and documented."
                .to_owned(),
            author: "Tech Lead".to_owned(),
            is_published: false,
        },
    ]
}

/// Insert the sample articles whose title is not already taken
#[tracing::instrument(skip(service))]
pub async fn seed(service: &ArticleService) -> Result<SeedReport, ServiceError> {
    let mut report = SeedReport::default();

    for sample in sample_articles() {
        let (article, created) = service.get_or_create(&sample).await?;
        if created {
            tracing::info!("Created article: {}", article.title);
            report.created += 1;
        } else {
            tracing::info!("Article already exists: {}", article.title);
            report.existing += 1;
        }
    }

    report.total = service.stats().await?.total;

    Ok(report)
}
