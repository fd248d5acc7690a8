mod test_model;
mod test_store;
