mod test_schema;
