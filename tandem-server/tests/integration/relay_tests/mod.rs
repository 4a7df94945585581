mod test_answer_and_candidate_forwarded;
