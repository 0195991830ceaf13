use crate::application::ports::util::SlugGenerator;
use slug::slugify;

#[derive(Debug, Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str, separator: &str) -> String {
        // The slug crate always joins with '-'; it never emits one except as
        // a separator, so remapping afterwards is lossless.
        let canonical = slugify(input);
        if separator == "-" {
            canonical
        } else {
            canonical.replace('-', separator)
        }
    }
}
