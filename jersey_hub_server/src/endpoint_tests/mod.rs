mod delete_image;
mod mocks;
