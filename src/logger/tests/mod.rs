mod test_facade;
